use web_sys::window;
use yew::Callback;

pub async fn copy_to_clipboard(text: String) -> Result<(), String> {
    let w = window().ok_or("No window".to_string())?;
    let cb = w.navigator().clipboard();
    wasm_bindgen_futures::JsFuture::from(cb.write_text(&text))
        .await
        .map_err(|_| {
            "Clipboard write failed (requires HTTPS + user gesture in many browsers)".to_string()
        })?;
    Ok(())
}

/// Hands a failed copy to the tool that asked for it.
fn report(outcome: Result<(), String>, on_error: &Callback<String>) {
    if let Err(e) = outcome {
        on_error.emit(e);
    }
}

/// Fire-and-forget copy. Failures go to `on_error` and the console.
pub fn copy_detached(text: String, on_error: Callback<String>) {
    wasm_bindgen_futures::spawn_local(async move {
        let outcome = copy_to_clipboard(text).await;
        if let Err(e) = &outcome {
            gloo::console::warn!(e.clone());
        }
        report(outcome, &on_error);
    });
}
