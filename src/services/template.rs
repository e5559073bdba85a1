//! Source template lookup and substitution

use tokio::fs;

use crate::constants::placeholders;
use crate::models::Problem;
use crate::utils::expand_home;

/// Return the body of the user template, or `fallback`.
///
/// An unset path or a path that does not exist is the normal case and falls
/// back silently. A path that cannot be checked or read is logged as a warning
/// and also falls back; template problems never fail a request.
pub async fn resolve_template(path: Option<&str>, fallback: &str) -> String {
    let Some(raw) = path else {
        return fallback.to_string();
    };

    let path = expand_home(raw);
    match fs::try_exists(&path).await {
        Ok(true) => {}
        Ok(false) => {
            tracing::debug!("Template {} not found, using built-in template", path.display());
            return fallback.to_string();
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Cannot check template {}, using built-in template",
                path.display()
            );
            return fallback.to_string();
        }
    }

    match fs::read_to_string(&path).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Failed to read template {}, using built-in template",
                path.display()
            );
            fallback.to_string()
        }
    }
}

/// Substitute problem fields into `template` in a single pass.
///
/// `{title}`, `{name}`, `{url}`, `{group}`, `{time_limit}` and
/// `{memory_limit}` are replaced. `{{` and `}}` produce literal braces.
/// Unknown `{...}` tokens and lone braces are copied through. Substituted
/// values are never scanned again.
pub fn render(template: &str, problem: &Problem) -> String {
    let mut out = String::with_capacity(template.len() + 128);
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") {
            out.push('{');
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with("}}") {
            out.push('}');
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with('{') {
            if let Some(end) = tail[1..].find('}') {
                if let Some(value) = placeholder_value(&tail[1..1 + end], problem) {
                    out.push_str(&value);
                    rest = &tail[end + 2..];
                    continue;
                }
            }
        }

        out.push_str(&tail[..1]);
        rest = &tail[1..];
    }

    out.push_str(rest);
    out
}

fn placeholder_value(key: &str, problem: &Problem) -> Option<String> {
    let value = match key {
        placeholders::TITLE => problem.title.clone(),
        placeholders::NAME => problem.name.clone(),
        placeholders::URL => problem.url.clone(),
        placeholders::GROUP => problem.group.clone(),
        placeholders::TIME_LIMIT => problem.time_limit_ms.to_string(),
        placeholders::MEMORY_LIMIT => problem.memory_limit_mb.to_string(),
        _ => return None,
    };
    Some(value)
}
