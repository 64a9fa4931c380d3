use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    Json,
    Base64,
    Uuid,
    Jwt,
    Webp,
}

impl Tool {
    pub const ALL: [Tool; 5] = [Tool::Json, Tool::Base64, Tool::Uuid, Tool::Jwt, Tool::Webp];

    pub fn label(self) -> &'static str {
        match self {
            Tool::Json => "JSON Formatter",
            Tool::Base64 => "Base64",
            Tool::Uuid => "UUID Generator",
            Tool::Jwt => "JWT Decoder",
            Tool::Webp => "WebP Converter",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Tool::Json => "Format, Validate, Tree View",
            Tool::Base64 => "Encode & Decode Strings",
            Tool::Uuid => "Generate Unique IDs",
            Tool::Jwt => "Decode Tokens securely",
            Tool::Webp => "Shrink Images for the Web",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Tool::Json => "{ }",
            Tool::Base64 => "64",
            Tool::Uuid => "#",
            Tool::Jwt => "🛡",
            Tool::Webp => "🖼",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
    pub active: Tool,
    pub open: bool,
    pub on_select: Callback<Tool>,
    pub on_close: Callback<()>,
}

#[function_component(Sidebar)]
pub fn sidebar(props: &SidebarProps) -> Html {
    let overlay_cls = if props.open { "overlay visible" } else { "overlay" };
    let aside_cls = if props.open { "sidebar open" } else { "sidebar" };
    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
      <>
        <div class={overlay_cls} onclick={close.clone()} />
        <aside class={aside_cls}>
          <div class="sidebar-head">
            <div class="brand">
              <span class="brand-mark">{ "🔑" }</span>
              <h1>{ "DevForge" }</h1>
            </div>
            <button class="btn ghost mobile-only" onclick={close}>{ "✕" }</button>
          </div>

          <nav class="nav">
            { for Tool::ALL.into_iter().map(|t| {
                let is_active = props.active == t;
                let cls = if is_active { "nav-item active" } else { "nav-item" };
                let on_select = props.on_select.clone();
                html! {
                  <button
                    class={cls}
                    aria-current={if is_active { "page" } else { "false" }}
                    onclick={Callback::from(move |_| on_select.emit(t))}
                  >
                    <span class="nav-icon">{ t.icon() }</span>
                    <span class="nav-text">
                      <span class="nav-label">{ t.label() }</span>
                      <span class="nav-desc">{ t.description() }</span>
                    </span>
                  </button>
                }
            })}
          </nav>

          <div class="sidebar-foot">
            <span class="pulse" />
            <span>{ "Client-side secure environment" }</span>
          </div>
        </aside>
      </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tool_has_distinct_label() {
        let mut labels: Vec<&str> = Tool::ALL.iter().map(|t| t.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), Tool::ALL.len());
        assert!(Tool::ALL.iter().all(|t| !t.description().is_empty()));
    }
}
