use yew::prelude::*;

use super::textarea_value;
use crate::ai::{self, AiConfig};
use crate::clipboard::copy_detached;
use crate::jwt::{self, DecodedJwt};

fn decoded_view(
    d: &DecodedJwt,
    explanation: Option<&str>,
    analyzing: bool,
    on_explain: Callback<MouseEvent>,
    on_copy_error: Callback<String>,
) -> Html {
    let header = d.header_pretty();
    let payload = d.payload_pretty();
    let copy = |text: String| {
        let on_copy_error = on_copy_error.clone();
        Callback::from(move |_: MouseEvent| copy_detached(text.clone(), on_copy_error.clone()))
    };

    html! {
      <>
        <div class="card">
          <div class="card-head">
            <span class="label seg-header">{ "Header" }</span>
            <div class="btnrow">
              <span class="subtle mono">{ "ALGORITHM & TOKEN TYPE" }</span>
              <button class="btn ghost" onclick={copy(header.clone())}>{ "Copy" }</button>
            </div>
          </div>
          <pre class="seg-header">{ header }</pre>
        </div>

        <div class="card">
          <div class="card-head">
            <span class="label seg-payload">{ "Payload" }</span>
            <div class="btnrow">
              <span class="subtle mono">{ "DATA & CLAIMS" }</span>
              <button class="btn ghost" onclick={on_explain} disabled={analyzing}>
                { if analyzing { "Analyzing..." } else { "✨ AI Explain" } }
              </button>
              <button class="btn ghost" onclick={copy(payload.clone())}>{ "Copy" }</button>
            </div>
          </div>
          <pre class="seg-payload">{ payload }</pre>
          if let Some(text) = explanation {
            <div class="ai-box">
              <div class="ai-title">{ "Security Insights" }</div>
              <p class="prewrap">{ text.to_string() }</p>
            </div>
          }
        </div>

        <div class="card">
          <div class="card-head">
            <span class="label seg-sig">{ "Signature" }</span>
            <span class="subtle mono">{ "NOT VERIFIED" }</span>
          </div>
          <pre class="seg-sig">{ jwt::signing_formula(d.alg()) }</pre>
          <div class="raw seg-sig">
            { if d.signature.is_empty() { "(empty signature segment)".to_string() } else { d.signature.clone() } }
          </div>
        </div>
      </>
    }
}

#[function_component(JwtTool)]
pub fn jwt_tool() -> Html {
    let token = use_state(String::new);
    let explanation = use_state_eq(|| None::<String>);
    let analyzing = use_state(|| false);
    let copy_error = use_state_eq(|| None::<String>);

    // Latest token, read by in-flight explanations so a reply for an old
    // token is dropped.
    let latest = use_mut_ref(String::new);
    *latest.borrow_mut() = (*token).clone();

    {
        let explanation = explanation.clone();
        let copy_error = copy_error.clone();
        use_effect_with((*token).clone(), move |_| {
            explanation.set(None);
            copy_error.set(None);
            || ()
        });
    }

    let outcome = jwt::decode(&token);

    let on_input = {
        let token = token.clone();
        Callback::from(move |e: InputEvent| token.set(textarea_value(e)))
    };

    let on_explain = {
        let token = token.clone();
        let latest = latest.clone();
        let explanation = explanation.clone();
        let analyzing = analyzing.clone();
        Callback::from(move |_: MouseEvent| {
            let asked_for = (*token).clone();
            let Ok(decoded) = jwt::decode(&asked_for) else {
                return;
            };
            let payload = decoded.payload_pretty();
            analyzing.set(true);
            let latest = latest.clone();
            let explanation = explanation.clone();
            let analyzing = analyzing.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let text = ai::explain_jwt_claims(&AiConfig::from_build_env(), &payload).await;
                if *latest.borrow() == asked_for {
                    explanation.set(Some(text));
                }
                analyzing.set(false);
            });
        })
    };

    let on_copy_error = {
        let copy_error = copy_error.clone();
        Callback::from(move |e: String| copy_error.set(Some(e)))
    };

    let error_line = match (&outcome, &*copy_error) {
        (Err(e), _) if !e.is_idle() => html! { <div class="alert">{ e.to_string() }</div> },
        (_, Some(e)) => html! { <div class="alert">{ e.clone() }</div> },
        _ => Html::default(),
    };

    let raw_line = match &outcome {
        Ok(d) => html! {
          <div class="raw mono">
            <span class="seg-header">{ d.raw.header.clone() }</span>
            { "." }
            <span class="seg-payload">{ d.raw.payload.clone() }</span>
            { "." }
            <span class="seg-sig">{ d.raw.signature.clone() }</span>
          </div>
        },
        Err(_) => Html::default(),
    };

    let output = match &outcome {
        Ok(d) => decoded_view(d, explanation.as_deref(), *analyzing, on_explain, on_copy_error),
        Err(_) => html! {
          <div class="placeholder dashed">
            <div class="placeholder-icon">{ "🛡" }</div>
            <p>{ "Enter a valid JWT to decode details" }</p>
          </div>
        },
    };

    html! {
      <div class="panel">
        <div class="tool-head">
          <div>
            <h2>{ "JWT Debugger" }</h2>
            <p class="subtle">{ "Decode and inspect JSON Web Tokens." }</p>
          </div>
        </div>

        <div class="jwt-grid">
          <div class="block">
            <div class="block-title">{ "Encoded Token" }</div>
            <textarea
              class={if outcome.as_ref().is_err_and(|e| !e.is_idle()) { "mono invalid" } else { "mono" }}
              value={(*token).clone()}
              oninput={on_input}
              spellcheck="false"
              placeholder="Paste JWT here (ey...)"
            />
            { error_line }
            { raw_line }
            <div class="smallnote">{ "Note: this decodes base64url; it does not verify signatures or expiry." }</div>
          </div>

          <div class="stack">
            { output }
          </div>
        </div>
      </div>
    }
}
