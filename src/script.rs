//! Inline `<head>` script that applies the stored mode before hydration.
//!
//! Server-rendered pages render with no mode class; without this script the
//! first paint uses the light styles and then flips once WASM boots. The
//! script mirrors the runtime rules so both paths agree.

use serde_json::Value;

use crate::config::WatcherConfig;

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

/// JSON-encode a string so it is a safe JS string literal inside `<script>`.
fn js_string(raw: &str) -> String {
    Value::from(raw).to_string().replace("</", "<\\/")
}

fn js_string_array(items: &[String]) -> String {
    let parts: Vec<String> = items.iter().map(|s| js_string(s)).collect();
    format!("[{}]", parts.join(","))
}

/// Build the self-invoking script for `config`.
#[must_use]
pub fn initial_mode_script(config: &WatcherConfig) -> String {
    let key = js_string(&config.storage_key);
    let default_mode = js_string(config.default_mode.as_str());
    let dark = js_string_array(&config.dark_class_names);
    let light = js_string_array(&config.light_class_names);
    let theme_colors = match &config.theme_colors {
        Some(colors) => format!("{{dark:{},light:{}}}", js_string(&colors.dark), js_string(&colors.light)),
        None => "null".to_owned(),
    };

    format!(
        "(function(){{\
var k={key},d={default_mode},dc={dark},lc={light},tc={theme_colors};\
var r=document.documentElement,m=null;\
try{{m=localStorage.getItem(k)}}catch(e){{}}\
if(m!==\"dark\"&&m!==\"light\"&&m!==\"system\"){{m=d}}\
var l=m===\"light\"||(m===\"system\"&&window.matchMedia(\"(prefers-color-scheme: light)\").matches);\
var a=l?lc:dc,x=l?dc:lc;\
if(x.length){{r.classList.remove.apply(r.classList,x)}}\
if(a.length){{r.classList.add.apply(r.classList,a)}}\
r.style.colorScheme=l?\"light\":\"dark\";\
if(tc){{var t=document.querySelector('meta[name=\"theme-color\"]');if(t){{t.setAttribute(\"content\",l?tc.light:tc.dark)}}}}\
try{{localStorage.setItem(k,m)}}catch(e){{}}\
}})();"
    )
}
