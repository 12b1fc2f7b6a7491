use html_escape::encode_text;
use views_ocr_common::BatchResult;

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 2em auto; max-width: 860px; }
textarea { width: 100%; height: 10em; }
table { border-collapse: collapse; width: 100%; margin-top: 1em; }
th, td { border: 1px solid #ccc; padding: 4px 8px; text-align: left; }
td.views { text-align: right; }
tr.total td { font-weight: bold; }
.error { color: #b00020; }
"#;

fn layout(input: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="ja">
<head>
<meta charset="utf-8">
<title>再生回数集計</title>
<style>{style}</style>
</head>
<body>
<h1>再生回数集計</h1>
<form method="post" action="/">
<label for="urls">URL（1行に1つ）</label>
<textarea id="urls" name="urls">{input}</textarea>
<button type="submit">集計</button>
</form>
{body}
</body>
</html>
"#,
        style = STYLE,
        input = encode_text(input),
        body = body,
    )
}

/// 入力フォームのみ
pub fn render_form(input: &str) -> String {
    layout(input, "")
}

/// エラーメッセージ付きフォーム
pub fn render_error(input: &str, message: &str) -> String {
    let body = format!(r#"<p class="error">{}</p>"#, encode_text(message));
    layout(input, &body)
}

/// 集計結果（入力順の表と合計）
pub fn render_results(input: &str, result: &BatchResult) -> String {
    let rows: String = result
        .entries
        .iter()
        .map(|entry| {
            format!(
                r#"<tr><td>{url}</td><td class="views">{views}</td></tr>"#,
                url = encode_text(&entry.url),
                views = format_views(entry.views),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let body = format!(
        r#"<table>
<thead><tr><th>URL</th><th>再生回数</th></tr></thead>
<tbody>
{rows}
<tr class="total"><td>合計</td><td class="views">{total}</td></tr>
</tbody>
</table>"#,
        rows = rows,
        total = format_views(result.total),
    );
    layout(input, &body)
}

/// 再生回数を整数に丸めて3桁区切りで表示
pub fn format_views(views: f64) -> String {
    let rounded = format!("{:.0}", views.max(0.0));
    let digits: Vec<char> = rounded.chars().collect();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*c);
    }
    out
}
