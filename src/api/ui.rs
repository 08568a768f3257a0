//! UI routes - the lookup page
//!
//! One inline HTML page with vanilla JS: type an ISBN, open the WebSocket,
//! render the three scores when the single result frame arrives.

use axum::{
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use crate::AppState;

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new().route("/", get(lookup_page))
}

/// Root page - ISBN lookup form
async fn lookup_page() -> impl IntoResponse {
    Html(
        r##"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>lexos - Reading Difficulty Lookup</title>
    <style>
        body {
            font-family: system-ui, -apple-system, sans-serif;
            max-width: 800px;
            margin: 40px auto;
            padding: 20px;
            line-height: 1.6;
        }
        h1 {
            color: #333;
            border-bottom: 2px solid #0066cc;
            padding-bottom: 10px;
        }
        input {
            padding: 10px;
            font-size: 1em;
            width: 260px;
        }
        .button {
            display: inline-block;
            padding: 10px 20px;
            background: #0066cc;
            color: white;
            border: none;
            border-radius: 4px;
            font-size: 1em;
            cursor: pointer;
        }
        .button:hover {
            background: #0052a3;
        }
        #result {
            margin-top: 20px;
            padding: 15px;
            background: #f5f5f5;
            border-radius: 4px;
            min-height: 1.6em;
        }
        .error { color: #a00; }
    </style>
</head>
<body>
    <h1>lexos</h1>
    <p>Look up Lexile, ATOS and AR scores for a book by ISBN.
       Scores of -1 mean the book was not found in that catalog.</p>
    <input id="isbn" placeholder="e.g. 978-0-13-468599-1">
    <button class="button" onclick="lookup()">Look up</button>
    <div id="result"></div>
    <script>
        function lookup() {
            const isbn = document.getElementById('isbn').value.trim();
            const result = document.getElementById('result');
            if (!isbn) {
                result.innerHTML = '<span class="error">Enter an ISBN first.</span>';
                return;
            }
            result.textContent = 'Looking up… (this drives a real browser, give it a moment)';
            const proto = location.protocol === 'https:' ? 'wss' : 'ws';
            const ws = new WebSocket(`${proto}://${location.host}/ws?isbn=${encodeURIComponent(isbn)}`);
            ws.onmessage = (ev) => {
                if (ev.data.startsWith('error:')) {
                    result.innerHTML = `<span class="error">${ev.data.slice(6)}</span>`;
                    return;
                }
                const r = JSON.parse(ev.data);
                result.innerHTML =
                    `<b>Lexile:</b> ${r.lexile} &nbsp; <b>ATOS:</b> ${r.atos} &nbsp; <b>AR points:</b> ${r.ar}`;
            };
            ws.onerror = () => {
                result.innerHTML = '<span class="error">Lookup failed. Is the ISBN valid?</span>';
            };
        }
    </script>
</body>
</html>
"##,
    )
}
