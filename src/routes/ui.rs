use axum::{extract::State, response::Html, routing::get, Router};

use crate::models::AppState;

pub fn router(state: AppState) -> Router {
    Router::new().route("/", get(index)).with_state(state)
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&state.config.pipeline.default_topic))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn render_page(default_topic: &str) -> String {
    PAGE.replace("{{DEFAULT_TOPIC}}", &escape_html(default_topic))
}

// The progress bar is cosmetic: its steps are fixed and do not track the run.
const PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Research Scribe - AI Research Assistant</title>
  <style>
    body { font-family: Arial, sans-serif; margin: 0; color: #1d1d1f; display: flex; min-height: 100vh; }
    aside { width: 300px; background: #f0f2f6; padding: 1.5rem; box-sizing: border-box; }
    main { flex: 1; padding: 2rem; }
    label { display: block; margin-top: 0.75rem; font-weight: 600; }
    input { width: 100%; padding: 0.5rem; box-sizing: border-box; }
    button { margin-top: 1rem; padding: 0.6rem 1rem; cursor: pointer; }
    .progress { background: #ddd; border-radius: 4px; height: 8px; margin-top: 1rem; display: none; }
    .progress > div { background: #1E90FF; height: 100%; width: 0; border-radius: 4px; transition: width 0.4s; }
    .error { color: #b00020; margin-top: 1rem; white-space: pre-wrap; }
    .tabs { margin-top: 1.5rem; display: none; }
    .tabs nav button { margin-right: 0.5rem; }
    .tabs nav button.active { font-weight: 700; }
    .research-output { background-color: #f0f2f6; padding: 20px; border-radius: 10px; margin: 10px 0; }
    .blog-output { background-color: #e6f3ff; padding: 20px; border-radius: 10px; margin: 10px 0; }
  </style>
</head>
<body>
  <aside>
    <h2>Research Scribe</h2>
    <label for="openaiKey">Enter your OpenAI API Key:</label>
    <input id="openaiKey" type="password" autocomplete="off" />
    <label for="serperKey">Enter your SerperDev API Key:</label>
    <input id="serperKey" type="password" autocomplete="off" />
    <hr />
    <h3>About</h3>
    <p>This app runs two agents to:</p>
    <ol>
      <li>Research your topic</li>
      <li>Generate a detailed analysis</li>
      <li>Create a blog post</li>
    </ol>
  </aside>

  <main>
    <h1>AI Research &amp; Content Generation</h1>
    <label for="topic">Enter your research topic:</label>
    <input id="topic" value="{{DEFAULT_TOPIC}}" />
    <button id="runBtn">Start Research &amp; Content Generation</button>

    <div class="progress" id="progress"><div id="progressFill"></div></div>
    <div id="status"></div>
    <div class="error" id="error"></div>

    <section class="tabs" id="tabs">
      <nav>
        <button data-tab="research" class="active">Research Report</button>
        <button data-tab="blog">Blog Post</button>
      </nav>
      <div id="tab-research">
        <h3>Research Findings</h3>
        <div class="research-output" id="researchOutput"></div>
        <button id="downloadResearch">Download Research Report</button>
      </div>
      <div id="tab-blog" style="display:none">
        <h3>Blog Post</h3>
        <div class="blog-output" id="blogOutput"></div>
        <button id="downloadBlog">Download Blog Post</button>
      </div>
    </section>
  </main>

  <script>
    const $ = (id) => document.getElementById(id);
    let result = null;

    function setProgress(percent, text) {
      $('progress').style.display = 'block';
      $('progressFill').style.width = percent + '%';
      $('status').textContent = text;
    }

    function download(fileName, text) {
      const blob = new Blob([text], { type: 'text/plain' });
      const link = document.createElement('a');
      link.href = URL.createObjectURL(blob);
      link.download = fileName;
      link.click();
      URL.revokeObjectURL(link.href);
    }

    document.querySelectorAll('.tabs nav button').forEach((btn) => {
      btn.addEventListener('click', () => {
        document.querySelectorAll('.tabs nav button').forEach((b) => b.classList.remove('active'));
        btn.classList.add('active');
        $('tab-research').style.display = btn.dataset.tab === 'research' ? 'block' : 'none';
        $('tab-blog').style.display = btn.dataset.tab === 'blog' ? 'block' : 'none';
      });
    });

    $('downloadResearch').addEventListener('click', () => result && download(result.research_file, result.research));
    $('downloadBlog').addEventListener('click', () => result && download(result.blog_file, result.blog));

    $('runBtn').addEventListener('click', async () => {
      $('error').textContent = '';
      const openaiKey = $('openaiKey').value;
      const serperKey = $('serperKey').value;
      if (!openaiKey || !serperKey) {
        $('error').textContent = 'Please enter both API keys in the sidebar first!';
        return;
      }

      $('tabs').style.display = 'none';
      setProgress(20, 'Initiating research process...');
      await new Promise((r) => setTimeout(r, 1000));
      setProgress(40, 'Analyzing data and generating insights...');

      try {
        const res = await fetch('/api/research', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify({
            topic: $('topic').value,
            openai_api_key: openaiKey,
            serper_api_key: serperKey
          })
        });
        const json = await res.json();
        if (!res.ok) {
          $('progress').style.display = 'none';
          $('status').textContent = '';
          $('error').textContent = [json.error, json.details].filter(Boolean).join('\n');
          return;
        }

        setProgress(80, 'Creating content...');
        await new Promise((r) => setTimeout(r, 1000));

        result = json;
        // Rendered server-side with raw HTML escaped
        $('researchOutput').innerHTML = json.research_html;
        $('blogOutput').innerHTML = json.blog_html;
        setProgress(100, 'Process completed!');
        $('tabs').style.display = 'block';
      } catch (e) {
        $('progress').style.display = 'none';
        $('error').textContent = 'An error occurred: ' + e + '\nPlease check your API keys and try again.';
      }
    });
  </script>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_page_default_topic() {
        let page = render_page("Medical Industry using Generative AI");
        assert!(page.contains(r#"value="Medical Industry using Generative AI""#));
        assert!(page.contains("research_file"));
        assert!(page.contains("innerHTML = json.research_html"));
        assert!(page.contains("innerHTML = json.blog_html"));
        assert!(!page.contains("{{DEFAULT_TOPIC}}"));
    }

    #[test]
    fn test_render_page_escapes_topic() {
        let page = render_page(r#"<script>"x"</script>"#);
        assert!(page.contains("&lt;script&gt;&quot;x&quot;&lt;/script&gt;"));
    }
}
