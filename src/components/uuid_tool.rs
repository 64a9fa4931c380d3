use gloo::timers::callback::Timeout;
use uuid::Uuid;
use yew::prelude::*;

use crate::clipboard::copy_detached;
use crate::uuid_gen::{generate_batch, next_id, render, QUANTITIES};

const COPIED_FLASH_MS: u32 = 1500;

#[function_component(UuidTool)]
pub fn uuid_tool() -> Html {
    let quantity = use_state(|| 1usize);
    let uppercase = use_state(|| false);
    let ids = use_state(|| generate_batch(1, next_id));
    let copied = use_state(|| None::<usize>);
    let copy_error = use_state(|| None::<String>);

    let on_copy_error = {
        let copy_error = copy_error.clone();
        Callback::from(move |e: String| copy_error.set(Some(e)))
    };

    let on_generate = {
        let quantity = quantity.clone();
        let ids = ids.clone();
        let copied = copied.clone();
        let copy_error = copy_error.clone();
        Callback::from(move |_| {
            ids.set(generate_batch(*quantity, next_id));
            copied.set(None);
            copy_error.set(None);
        })
    };

    let on_toggle_upper = {
        let uppercase = uppercase.clone();
        Callback::from(move |_| uppercase.set(!*uppercase))
    };

    let rendered: Vec<String> = ids.iter().map(|id: &Uuid| render(id, *uppercase)).collect();

    let on_copy_all = {
        let all = rendered.join("\n");
        let on_copy_error = on_copy_error.clone();
        Callback::from(move |_| copy_detached(all.clone(), on_copy_error.clone()))
    };

    let copy_row = |idx: usize, text: String| {
        let copied = copied.clone();
        let on_copy_error = on_copy_error.clone();
        Callback::from(move |_: MouseEvent| {
            copy_detached(text.clone(), on_copy_error.clone());
            copied.set(Some(idx));
            let copied = copied.clone();
            let _ = Timeout::new(COPIED_FLASH_MS, move || copied.set(None)).forget();
        })
    };

    html! {
      <div class="panel narrow">
        <div class="tool-head">
          <div>
            <h2>{ "UUID Generator" }</h2>
            <p class="subtle">{ "Generate Version 4 UUIDs instantly." }</p>
          </div>
        </div>

        <div class="block">
          <div class="block-head">
            <div class="quantity">
              <span class="subtle">{ "Quantity:" }</span>
              <div class="segmented">
                { for QUANTITIES.into_iter().map(|n| {
                    let quantity = quantity.clone();
                    let cls = if *quantity == n { "seg-btn active" } else { "seg-btn" };
                    html! {
                      <button class={cls} onclick={Callback::from(move |_| quantity.set(n))}>
                        { n.to_string() }
                      </button>
                    }
                })}
              </div>
            </div>
            <div class="btnrow">
              <button class="btn secondary" onclick={on_toggle_upper}>
                { if *uppercase { "Uppercase: ON" } else { "Uppercase: OFF" } }
              </button>
              <button class="btn" onclick={on_generate}>{ "Generate" }</button>
            </div>
          </div>

          <div class="uuid-list">
            { for rendered.iter().enumerate().map(|(idx, text)| html! {
                <div class="uuid-row" key={format!("{text}-{idx}")}>
                  <span class="mono">{ text.clone() }</span>
                  <button class="btn ghost" title="Copy" onclick={copy_row(idx, text.clone())}>
                    { if *copied == Some(idx) { "✓" } else { "Copy" } }
                  </button>
                </div>
            })}
          </div>

          if let Some(e) = &*copy_error {
            <div class="alert">{ e.clone() }</div>
          }

          if rendered.len() > 1 {
            <div class="btnrow end">
              <button class="btn ghost" onclick={on_copy_all}>{ "Copy All" }</button>
            </div>
          }
        </div>
      </div>
    }
}
