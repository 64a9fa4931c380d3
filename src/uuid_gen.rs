/* ---------- UUID helpers ---------- */

use uuid::{Builder, Uuid};
use wasm_bindgen::JsValue;

pub const QUANTITIES: [usize; 4] = [1, 5, 10, 20];

/// Version 4 UUID from the caller's byte source. The version nibble and the
/// RFC 4122 variant bits are always set, whatever the bytes are.
pub fn fallback_v4(mut next_byte: impl FnMut() -> u8) -> Uuid {
    let mut bytes = [0u8; 16];
    bytes.iter_mut().for_each(|b| *b = next_byte());
    Builder::from_random_bytes(bytes).into_uuid()
}

pub fn generate_batch(quantity: usize, mut make: impl FnMut() -> Uuid) -> Vec<Uuid> {
    (0..quantity).map(|_| make()).collect()
}

pub fn render(id: &Uuid, uppercase: bool) -> String {
    let s = id.hyphenated().to_string();
    if uppercase {
        s.to_uppercase()
    } else {
        s
    }
}

/// Browser entry point: `crypto.getRandomValues` when the page has it,
/// `Math.random` otherwise.
pub fn next_id() -> Uuid {
    if crypto_available() {
        Uuid::new_v4()
    } else {
        fallback_v4(|| (js_sys::Math::random() * 256.0) as u8)
    }
}

fn crypto_available() -> bool {
    web_sys::window()
        .and_then(|w| js_sys::Reflect::get(&w, &JsValue::from_str("crypto")).ok())
        .map(|c| !c.is_undefined() && !c.is_null())
        .unwrap_or(false)
}
