use serde_json::Value;
use yew::prelude::*;

use super::textarea_value;
use crate::ai::{self, AiConfig};
use crate::clipboard::copy_detached;
use crate::json::{self, TypeStats};

const SAMPLE: &str =
    r#"{"name": "DevForge", "version": 1.0, "features": ["JSON", "Base64", "JWT"], "active": true}"#;

/// Tree nodes shallower than this start expanded.
const EXPANDED_DEPTH: usize = 2;

#[derive(Clone, Copy, PartialEq, Eq)]
enum View {
    Tree,
    Stats,
}

#[derive(Properties, PartialEq)]
struct JsonNodeProps {
    #[prop_or_default]
    name: Option<String>,
    value: Value,
    #[prop_or_default]
    depth: usize,
    #[prop_or(true)]
    is_last: bool,
}

#[function_component(JsonNode)]
fn json_node(props: &JsonNodeProps) -> Html {
    let expanded = use_state(|| props.depth < EXPANDED_DEPTH);

    let indent = "  ".repeat(props.depth);
    let comma = if props.is_last { "" } else { "," };
    let name = props
        .name
        .as_ref()
        .map(|n| html! { <span class="json-key">{ format!("{n}: ") }</span> })
        .unwrap_or_default();

    let children: Vec<(Option<String>, Value)> = match &props.value {
        Value::Array(items) => items.iter().map(|v| (None, v.clone())).collect(),
        Value::Object(map) => map.iter().map(|(k, v)| (Some(k.clone()), v.clone())).collect(),
        scalar => {
            let cls = match scalar {
                Value::String(_) => "json-string",
                Value::Number(_) => "json-number",
                Value::Bool(_) => "json-bool",
                _ => "json-null",
            };
            return html! {
              <div class="json-row">
                <span class="json-indent">{ indent }</span>
                { name }
                <span class={cls}>{ json::scalar_label(scalar) }</span>
                <span class="json-punct">{ comma }</span>
              </div>
            };
        }
    };

    let (open, close) = if props.value.is_array() { ("[", "]") } else { ("{", "}") };
    let toggle = {
        let expanded = expanded.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            expanded.set(!*expanded);
        })
    };
    let is_array = props.value.is_array();
    let count = children.len();
    let last = count.saturating_sub(1);

    html! {
      <div class="json-branch">
        <div class="json-row clickable" onclick={toggle}>
          <span class="json-indent">{ indent.clone() }</span>
          <span class="json-caret">{ if *expanded { "▾" } else { "▸" } }</span>
          { name }
          <span class="json-punct">{ open }</span>
          if !*expanded {
            <span class="json-summary">{ format!(" {count} items ... {close}{comma}") }</span>
          }
        </div>
        if *expanded {
          { for children.into_iter().enumerate().map(|(i, (key, value))| html! {
              <JsonNode
                key={i.to_string()}
                name={if is_array { None } else { key }}
                value={value}
                depth={props.depth + 1}
                is_last={i == last}
              />
          })}
          <div class="json-row">
            <span class="json-indent">{ indent }</span>
            <span class="json-punct">{ format!("{close}{comma}") }</span>
          </div>
        }
      </div>
    }
}

#[function_component(JsonTool)]
pub fn json_tool() -> Html {
    let input = use_state(|| SAMPLE.to_string());
    let error = use_state(|| None::<String>);
    let view = use_state(|| View::Tree);
    let analysis = use_state(|| None::<String>);
    let analyzing = use_state(|| false);

    // Live parse drives the tree and stats; errors wait for Format/Minify.
    let parsed = json::parse(&input).ok();

    let on_format = {
        let input = input.clone();
        let error = error.clone();
        Callback::from(move |_| match json::format(&input) {
            Ok(s) => {
                input.set(s);
                error.set(None);
            }
            Err(e) => error.set(Some(e.to_string())),
        })
    };

    let on_minify = {
        let input = input.clone();
        let error = error.clone();
        Callback::from(move |_| match json::minify(&input) {
            Ok(s) => {
                input.set(s);
                error.set(None);
            }
            Err(e) => error.set(Some(e.to_string())),
        })
    };

    let on_clear = {
        let input = input.clone();
        let error = error.clone();
        let analysis = analysis.clone();
        Callback::from(move |_| {
            input.set(String::new());
            error.set(None);
            analysis.set(None);
        })
    };

    let on_copy = {
        let input = input.clone();
        let error = error.clone();
        Callback::from(move |_| {
            let error = error.clone();
            copy_detached((*input).clone(), Callback::from(move |e: String| error.set(Some(e))));
        })
    };

    let on_input = {
        let input = input.clone();
        let error = error.clone();
        Callback::from(move |e: InputEvent| {
            let v = textarea_value(e);
            error.set(json::error_after_edit(&v, (*error).clone()));
            input.set(v);
        })
    };

    let on_analyze = {
        let input = input.clone();
        let analysis = analysis.clone();
        let analyzing = analyzing.clone();
        Callback::from(move |_| {
            let Ok(compact) = json::minify(&input) else {
                return;
            };
            analyzing.set(true);
            analysis.set(None);
            let analysis = analysis.clone();
            let analyzing = analyzing.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let text = ai::generate_json_analysis(&AiConfig::from_build_env(), &compact).await;
                analysis.set(Some(text));
                analyzing.set(false);
            });
        })
    };

    let set_view = |v: View| {
        let view = view.clone();
        Callback::from(move |_: MouseEvent| view.set(v))
    };
    let view_btn_cls = |v: View| if *view == v { "seg-btn active" } else { "seg-btn" };

    let output = match (&parsed, *view) {
        (Some(v), View::Tree) => html! {
          <div class="json-tree">
            <JsonNode value={v.clone()} />
          </div>
        },
        (Some(v), View::Stats) => {
            let stats = TypeStats::collect(v);
            let total = stats.total().max(1);
            html! {
              <div class="stats">
                <h3>{ "Data Structure Distribution" }</h3>
                { for stats.entries().into_iter().map(|(label, n)| html! {
                    <div class="stat-row">
                      <span class="stat-label">{ label }</span>
                      <div class="stat-bar">
                        <div class="stat-fill" style={format!("width: {}%", n * 100 / total)} />
                      </div>
                      <span class="stat-count">{ n.to_string() }</span>
                    </div>
                })}
                if let Some(text) = &*analysis {
                  <div class="ai-box">
                    <div class="ai-title">{ "✨ AI Analysis" }</div>
                    <pre>{ text.clone() }</pre>
                  </div>
                }
              </div>
            }
        }
        (None, _) => html! {
          <div class="placeholder">
            { if error.is_some() { "Invalid JSON" } else { "Enter valid JSON to view" } }
          </div>
        },
    };

    html! {
      <div class="panel">
        <div class="tool-head">
          <div>
            <h2>{ "JSON Processor" }</h2>
            <p class="subtle">{ "Format, validate, and inspect JSON data." }</p>
          </div>
          <div class="btnrow">
            <button class="btn secondary" onclick={on_clear}>{ "Clear" }</button>
            <button class="btn secondary" onclick={on_copy}>{ "Copy" }</button>
            <button class="btn secondary" onclick={on_minify}>{ "Minify" }</button>
            <button class="btn" onclick={on_format}>{ "Format" }</button>
          </div>
        </div>

        <div class="two-col">
          <div class="block">
            <div class="block-head">
              <div class="block-title">{ "Input JSON" }</div>
              if let Some(e) = &*error {
                <span class="alert-inline">{ e.clone() }</span>
              }
            </div>
            <textarea
              class={if error.is_some() { "invalid" } else { "" }}
              value={(*input).clone()}
              oninput={on_input}
              spellcheck="false"
              placeholder="Paste your JSON here..."
            />
          </div>

          <div class="block">
            <div class="block-head">
              <div class="segmented">
                <button class={view_btn_cls(View::Tree)} onclick={set_view(View::Tree)}>{ "Tree View" }</button>
                <button class={view_btn_cls(View::Stats)} onclick={set_view(View::Stats)}>{ "Stats & AI" }</button>
              </div>
              if *view == View::Stats {
                <button
                  class="btn ghost"
                  onclick={on_analyze}
                  disabled={parsed.is_none() || *analyzing}
                >
                  { if *analyzing { "Analyzing..." } else { "✨ Generate Types" } }
                </button>
              }
            </div>
            <div class="output">{ output }</div>
          </div>
        </div>
      </div>
    }
}
