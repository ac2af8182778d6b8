use crate::markup::{escape_html, script_json};
use crate::tail::TailRequest;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

pub struct PageContext<'a> {
    /// Already filtered and escaped lines.
    pub text: &'a str,
    pub path: &'a Path,
    /// Endpoint the poller calls back.
    pub route: &'a str,
    pub refresh_interval_millis: u64,
    pub pointer: u64,
    pub request: &'a TailRequest,
}

/// State handed to the poller script.
#[derive(Serialize)]
struct PollerState<'a> {
    endpoint: &'a str,
    params: BTreeMap<&'static str, String>,
    pointer: u64,
    interval: u64,
    label: String,
    paused: bool,
}

/// Human readable refresh interval, e.g. `5 secs` or `250 ms`.
pub fn format_interval(millis: u64) -> String {
    if millis >= 1000 && millis % 1000 == 0 {
        format!("{} secs", millis / 1000)
    } else {
        format!("{} ms", millis)
    }
}

/// Render the self-contained viewer page.
pub fn render_page(ctx: &PageContext<'_>) -> String {
    let label = format_interval(ctx.refresh_interval_millis);

    let state = PollerState {
        endpoint: ctx.route,
        params: ctx.request.echo_params().into_iter().collect(),
        pointer: ctx.pointer,
        interval: ctx.refresh_interval_millis,
        label: label.clone(),
        paused: false,
    };

    // Only strings, maps and integers: serialization cannot fail.
    let state = script_json(&state).unwrap_or_else(|_| "{}".to_string());

    let highlight_checked = if ctx.request.filters.highlight_prefix {
        " checked"
    } else {
        ""
    };

    let mut html = String::with_capacity(ctx.text.len() + 4096);

    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html>\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");

    html.push_str("<title>Tail ");
    html.push_str(&escape_html(&ctx.request.log_name));
    html.push_str("</title>\n");

    html.push_str("<style>input[type='text']{width:50px}</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str(
        "<div id=\"logScroll\" style=\"border: 1px solid; padding: 5px; height: 780px; overflow: scroll;\">",
    );
    html.push_str("<code id=\"logData\">");
    html.push_str(ctx.text);
    html.push_str("</code></div>\n");

    html.push_str("<br><div>Log file : ");
    html.push_str(&escape_html(&ctx.path.display().to_string()));
    html.push_str("</div><br>\n");

    html.push_str("<div>Refreshing : <span id=\"status\" style=\"color:red\">");
    html.push_str(&escape_html(&label));
    html.push_str("</span>\n");
    html.push_str(" | <input type=\"button\" value=\"pause\" onclick=\"togglePause(this)\"/>\n");
    html.push_str(" | <input type=\"button\" value=\"clear\" onclick=\"clearLog()\"/>\n");
    html.push_str(" | Color Line Begin : <input type=\"checkbox\" onchange=\"setHighlight(this.checked)\"");
    html.push_str(highlight_checked);
    html.push_str("/>\n");
    html.push_str(" | Font Size : <input type=\"text\" onchange=\"logData.style.fontSize = this.value + 'px'\"/> Px\n");
    html.push_str("</div>\n");

    html.push_str("<script type=\"text/javascript\">\n");
    html.push_str("var tail = ");
    html.push_str(&state);
    html.push_str(";\n");
    html.push_str(POLLER_SCRIPT);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>\n");

    html
}

/// Poll loop: echo `tail.params` plus the last pointer, append `log`, keep `pointer`.
pub(crate) const POLLER_SCRIPT: &str = concat!(
    "var logData = document.getElementById('logData');\n",
    "var logScroll = document.getElementById('logScroll');\n",
    "function updateLog() {\n",
    "  if (tail.paused) { return; }\n",
    "  var query = new URLSearchParams(tail.params);\n",
    "  query.set('pointer', tail.pointer);\n",
    "  fetch(tail.endpoint + '?' + query.toString())\n",
    "    .then(function (res) { return res.ok ? res.json() : null; })\n",
    "    .then(function (data) {\n",
    "      if (!data) { return; }\n",
    "      if (data.log) {\n",
    "        logData.insertAdjacentHTML('beforeend', data.log);\n",
    "        logScroll.scrollTop = logScroll.scrollHeight;\n",
    "      }\n",
    "      tail.pointer = data.pointer;\n",
    "    })\n",
    "    .catch(function () {});\n",
    "}\n",
    "function togglePause(button) {\n",
    "  tail.paused = !tail.paused;\n",
    "  button.value = tail.paused ? 'resume' : 'pause';\n",
    "  document.getElementById('status').textContent = tail.paused ? 'paused' : tail.label;\n",
    "}\n",
    "function clearLog() { logData.innerHTML = ''; }\n",
    "function setHighlight(on) {\n",
    "  if (on) { tail.params.colorLineBegin = 'true'; } else { delete tail.params.colorLineBegin; }\n",
    "}\n",
    "logScroll.scrollTop = logScroll.scrollHeight;\n",
    "setInterval(updateLog, tail.interval);\n",
);

