use yew::prelude::*;

use super::textarea_value;
use crate::base64_codec::{decode_text, encode_text};
use crate::clipboard::copy_detached;

const SAMPLE: &str = "Hello World";

/// Which pane the user is typing in.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Encode,
    Decode,
}

#[function_component(Base64Tool)]
pub fn base64_tool() -> Html {
    let plain = use_state(|| SAMPLE.to_string());
    let encoded = use_state(|| encode_text(SAMPLE));
    let mode = use_state(|| Mode::Encode);
    let hint = use_state(|| None::<String>);

    let on_plain_input = {
        let plain = plain.clone();
        let encoded = encoded.clone();
        let hint = hint.clone();
        Callback::from(move |e: InputEvent| {
            let v = textarea_value(e);
            encoded.set(encode_text(&v));
            plain.set(v);
            hint.set(None);
        })
    };

    // A failed decode leaves the plain pane as it was.
    let on_encoded_input = {
        let plain = plain.clone();
        let encoded = encoded.clone();
        let hint = hint.clone();
        Callback::from(move |e: InputEvent| {
            let v = textarea_value(e);
            match decode_text(&v) {
                Ok(s) => {
                    plain.set(s);
                    hint.set(None);
                }
                Err(e) => hint.set(Some(e.to_string())),
            }
            encoded.set(v);
        })
    };

    let focus = |m: Mode| {
        let mode = mode.clone();
        Callback::from(move |_: FocusEvent| mode.set(m))
    };

    let on_clear = {
        let plain = plain.clone();
        let encoded = encoded.clone();
        let hint = hint.clone();
        Callback::from(move |_| {
            plain.set(String::new());
            encoded.set(String::new());
            hint.set(None);
        })
    };

    let copy = |text: String| {
        let hint = hint.clone();
        Callback::from(move |_: MouseEvent| {
            let hint = hint.clone();
            copy_detached(text.clone(), Callback::from(move |e: String| hint.set(Some(e))));
        })
    };
    let pane_cls = |m: Mode| if *mode == m { "active" } else { "" };

    html! {
      <div class="panel narrow">
        <div class="tool-head">
          <div>
            <h2>{ "Base64 Converter" }</h2>
            <p class="subtle">{ "Encode and decode text in real-time." }</p>
          </div>
          <button class="btn secondary" onclick={on_clear}>{ "Clear All" }</button>
        </div>

        <div class="block">
          <div class="block-head">
            <div class="block-title">{ "Plain Text" }</div>
            <button class="btn ghost" onclick={copy((*plain).clone())}>{ "Copy" }</button>
          </div>
          <textarea
            class={pane_cls(Mode::Encode)}
            value={(*plain).clone()}
            oninput={on_plain_input}
            onfocus={focus(Mode::Encode)}
            placeholder="Type plain text here..."
          />
        </div>

        <div class="divider">{ "⇅" }</div>

        <div class="block">
          <div class="block-head">
            <div class="block-title">{ "Base64 Encoded" }</div>
            <button class="btn ghost" onclick={copy((*encoded).clone())}>{ "Copy" }</button>
          </div>
          <textarea
            class={pane_cls(Mode::Decode)}
            value={(*encoded).clone()}
            oninput={on_encoded_input}
            onfocus={focus(Mode::Decode)}
            placeholder="Type Base64 string here..."
          />
          if let Some(h) = &*hint {
            <div class="alert">{ h.clone() }</div>
          }
        </div>
      </div>
    }
}
