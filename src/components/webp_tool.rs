use gloo_file::ObjectUrl;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlAnchorElement, HtmlInputElement};
use yew::prelude::*;

use crate::webp::{self, EncodeOptions, WebpError};

struct Source {
    name: String,
    size: u64,
    url: ObjectUrl,
}

struct Output {
    file_name: String,
    size: u64,
    url: ObjectUrl,
}

fn trigger_download(url: &str, file_name: &str) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("No document"))?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into()
        .map_err(JsValue::from)?;
    anchor.set_href(url);
    anchor.set_download(file_name);
    anchor.click();
    Ok(())
}

#[function_component(WebpTool)]
pub fn webp_tool() -> Html {
    // Dropping an ObjectUrl revokes it, so replacing or unmounting these
    // releases the blobs.
    let source = use_state(|| None::<Source>);
    let output = use_state(|| None::<Output>);
    let options = use_state(EncodeOptions::default);
    let converting = use_state(|| false);
    let error = use_state(|| None::<String>);
    let dragging = use_state(|| false);
    let file_input = use_node_ref();

    // URL of the image currently loaded; a conversion finishing for an
    // earlier image is discarded.
    let current = use_mut_ref(String::new);
    *current.borrow_mut() = (*source)
        .as_ref()
        .map(|s| s.url.to_string())
        .unwrap_or_default();

    let handle_file = {
        let source = source.clone();
        let output = output.clone();
        let error = error.clone();
        Callback::from(move |file: web_sys::File| {
            if !webp::is_image_mime(&file.type_()) {
                error.set(Some(WebpError::NotAnImage.to_string()));
                return;
            }
            let name = file.name();
            let size = file.size() as u64;
            source.set(Some(Source {
                name,
                size,
                url: webp::object_url(file),
            }));
            output.set(None);
            error.set(None);
        })
    };

    let on_pick = {
        let handle_file = handle_file.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(file) = input.files().and_then(|f| f.get(0)) {
                handle_file.emit(file);
            }
            input.set_value("");
        })
    };

    let on_drop = {
        let handle_file = handle_file.clone();
        let dragging = dragging.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            dragging.set(false);
            if let Some(file) = e
                .data_transfer()
                .and_then(|dt| dt.files())
                .and_then(|f| f.get(0))
            {
                handle_file.emit(file);
            }
        })
    };

    let on_drag_over = {
        let dragging = dragging.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            dragging.set(true);
        })
    };

    let on_drag_leave = {
        let dragging = dragging.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            dragging.set(false);
        })
    };

    let on_browse = {
        let file_input = file_input.clone();
        Callback::from(move |_| {
            if let Some(input) = file_input.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };

    let on_convert = {
        let source = source.clone();
        let output = output.clone();
        let options = options.clone();
        let converting = converting.clone();
        let error = error.clone();
        let current = current.clone();
        Callback::from(move |_| {
            let Some(src) = &*source else {
                return;
            };
            let url = src.url.to_string();
            let file_name = webp::output_file_name(&src.name);
            let opts = *options;
            let output = output.clone();
            let converting = converting.clone();
            let error = error.clone();
            let current = current.clone();
            converting.set(true);
            error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                let converted = webp::convert(&url, opts).await;
                converting.set(false);
                if *current.borrow() != url {
                    return;
                }
                match converted {
                    Ok(done) => output.set(Some(Output {
                        file_name,
                        size: done.size,
                        url: done.url,
                    })),
                    Err(e) => {
                        gloo::console::error!("WebP conversion failed:", e.to_string());
                        error.set(Some(e.to_string()));
                    }
                }
            });
        })
    };

    let on_download = {
        let output = output.clone();
        let error = error.clone();
        Callback::from(move |_| {
            if let Some(out) = &*output {
                if trigger_download(&out.url, &out.file_name).is_err() {
                    error.set(Some("Download failed".to_string()));
                }
            }
        })
    };

    let on_clear = {
        let source = source.clone();
        let output = output.clone();
        let error = error.clone();
        Callback::from(move |_| {
            source.set(None);
            output.set(None);
            error.set(None);
        })
    };

    let set_lossless = |lossless: bool| {
        let options = options.clone();
        Callback::from(move |_: MouseEvent| options.set(EncodeOptions { lossless, ..*options }))
    };

    let on_quality = {
        let options = options.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(q) = input.value().parse::<u8>() {
                options.set(EncodeOptions {
                    quality: q.clamp(1, 100),
                    ..*options
                });
            }
        })
    };

    let mode_cls = |lossless: bool| {
        if options.lossless == lossless { "seg-btn active" } else { "seg-btn" }
    };
    let drop_cls = if *dragging { "dropzone dragging" } else { "dropzone" };

    let source_card = match &*source {
        Some(src) => html! {
          <div class="card">
            <div class="card-head">
              <span class="label">{ src.name.clone() }</span>
              <span class="subtle">{ webp::format_size(src.size) }</span>
            </div>
            <img class="preview" src={src.url.to_string()} alt="Source" />
          </div>
        },
        None => Html::default(),
    };

    let output_card = match (&*source, &*output) {
        (Some(src), Some(out)) => {
            let change = webp::savings_percent(src.size, out.size)
                .map(|p| format!("{}{:.1}%", if p > 0.0 { "-" } else { "+" }, p.abs()))
                .unwrap_or_default();
            html! {
              <div class="card">
                <div class="card-head">
                  <span class="label">{ out.file_name.clone() }</span>
                  <span class="subtle">{ format!("{} ({change})", webp::format_size(out.size)) }</span>
                </div>
                <img class="preview" src={out.url.to_string()} alt="WebP result" />
                <div class="btnrow">
                  <button class="btn secondary" onclick={on_convert.clone()} disabled={*converting}>
                    { if *converting { "Converting..." } else { "Convert Again" } }
                  </button>
                  <button class="btn" onclick={on_download}>{ "Download" }</button>
                </div>
              </div>
            }
        }
        (Some(_), None) => html! {
          <div class="card">
            <div class="placeholder">{ "Click Convert to generate WebP" }</div>
            <button class="btn wide" onclick={on_convert.clone()} disabled={*converting}>
              { if *converting { "Converting..." } else { "Convert to WebP" } }
            </button>
          </div>
        },
        _ => Html::default(),
    };

    html! {
      <div class="panel narrow">
        <div class="tool-head">
          <div>
            <h2>{ "WebP Converter" }</h2>
            <p class="subtle">{ "Convert images to WebP format for smaller file sizes." }</p>
          </div>
          <button class="btn secondary" onclick={on_clear}>{ "Clear" }</button>
        </div>

        <div class="block">
          <div class="block-head">
            <div class="segmented">
              <button class={mode_cls(true)} onclick={set_lossless(true)}>{ "Lossless" }</button>
              <button class={mode_cls(false)} onclick={set_lossless(false)}>{ "Lossy" }</button>
            </div>
            if !options.lossless {
              <div class="quality">
                <span class="subtle">{ "Quality:" }</span>
                <input
                  type="range"
                  min="1"
                  max="100"
                  value={options.quality.to_string()}
                  oninput={on_quality}
                />
                <span class="mono">{ format!("{}%", options.quality) }</span>
              </div>
            }
            <span class="smallnote">
              { if options.lossless { "Best for PNG/graphics" } else { "Best for photos/JPG" } }
            </span>
          </div>

          <div
            class={drop_cls}
            ondrop={on_drop}
            ondragover={on_drag_over}
            ondragleave={on_drag_leave}
            onclick={on_browse}
          >
            <p>{ "Drop an image here, or click to browse" }</p>
          </div>
          <input
            ref={file_input}
            type="file"
            accept="image/*"
            class="hidden"
            onchange={on_pick}
          />

          if let Some(e) = &*error {
            <div class="alert">{ e.clone() }</div>
          }
        </div>

        <div class="two-col">
          { source_card }
          { output_card }
        </div>
      </div>
    }
}
