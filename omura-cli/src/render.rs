//! Output rendering for documents and responses.

use omura_client::{Request, Response};
use omura_config::OutputFormat;
use omura_parser::gemtext::formats::{to_json_str, to_treeviz_str, tokens_to_json_str};
use omura_parser::gemtext::loader::DocumentLoader;
use omura_parser::Root;

/// Render a gemtext document in the requested format. `Gemtext` returns the source as is.
pub fn render_document(
    loader: &DocumentLoader,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Gemtext => Ok(loader.source()),
        OutputFormat::Tree => Ok(to_treeviz_str(&loader.parse())),
        OutputFormat::Tokens => tokens_to_json_str(&loader.tokenize()),
        OutputFormat::AstJson => to_json_str(&loader.parse()),
    }
}

/// The `status meta` line shown for responses that carry no document.
pub fn status_line(response: &Response) -> String {
    format!(
        "{} {} ({})",
        response.status(),
        response.meta(),
        response.group()
    )
}

/// Numbered navigation list of the links in `root`, resolved against `request`.
///
/// Links that fail to resolve (or resolve to something that is not a valid request, e.g. a
/// URL with userinfo) are listed with their target as written.
pub fn link_list(request: &Request, root: &Root) -> String {
    let mut out = String::new();
    for (index, (target, text)) in link_targets(root).enumerate() {
        let resolved = match request.resolve(target) {
            Ok(resolved) => resolved.url().to_string(),
            Err(_) => target.to_string(),
        };
        if text.is_empty() {
            out.push_str(&format!("[{}] {}\n", index + 1, resolved));
        } else {
            out.push_str(&format!("[{}] {} {}\n", index + 1, resolved, text));
        }
    }
    out
}

/// `(url, text)` of every link that has a url. Its position plus one is the link's number.
fn link_targets(root: &Root) -> impl Iterator<Item = (&str, &str)> {
    root.links()
        .filter_map(|link| link.url.as_deref().map(|url| (url, link.text.as_str())))
}

/// The request for link `number` of `root`, resolved against the page's `request`.
pub fn checkout_target(request: &Request, root: &Root, number: usize) -> Result<Request, String> {
    let target = number
        .checked_sub(1)
        .and_then(|index| link_targets(root).nth(index))
        .map(|(url, _)| url)
        .ok_or_else(|| {
            format!(
                "no link [{}] on {} ({} links)",
                number,
                request.url(),
                link_targets(root).count()
            )
        })?;
    request
        .resolve(target)
        .map_err(|err| format!("cannot follow link [{}] {}: {}", number, target, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_list_resolves_relative_targets() {
        let request = Request::parse("gemini://x.example/docs/index.gmi").unwrap();
        let root = omura_parser::parse_document(
            "# Docs\n=> ../about.gmi About\n=> gemini://y.example/\n=> https://z.example/ Web\n",
        );
        assert_eq!(
            link_list(&request, &root),
            "[1] gemini://x.example/about.gmi About\n\
             [2] gemini://y.example/\n\
             [3] https://z.example/ Web\n"
        );
    }

    #[test]
    fn test_checkout_target_counts_only_links_with_urls() {
        let request = Request::parse("gemini://x.example/docs/index.gmi").unwrap();
        let root = omura_parser::parse_document("=>\n=> next.gmi Next\n=> /top Top\n");
        let target = checkout_target(&request, &root, 1).unwrap();
        assert_eq!(target.url().as_str(), "gemini://x.example/docs/next.gmi");
        let target = checkout_target(&request, &root, 2).unwrap();
        assert_eq!(target.url().as_str(), "gemini://x.example/top");
    }

    #[test]
    fn test_checkout_target_out_of_range() {
        let request = Request::parse("gemini://x.example/").unwrap();
        let root = omura_parser::parse_document("=> a A\n");
        assert_eq!(
            checkout_target(&request, &root, 2).unwrap_err(),
            "no link [2] on gemini://x.example/ (1 links)"
        );
        assert!(checkout_target(&request, &root, 0).is_err());
    }

    #[test]
    fn test_checkout_target_rejects_invalid_link() {
        let request = Request::parse("gemini://x.example/").unwrap();
        let root = omura_parser::parse_document("=> gemini://u@y.example/\n");
        let err = checkout_target(&request, &root, 1).unwrap_err();
        assert!(err.starts_with("cannot follow link [1] gemini://u@y.example/"));
    }

    #[test]
    fn test_gemtext_format_is_source() {
        let loader = DocumentLoader::from_string("# Hi\r\n* a\n");
        let out = render_document(&loader, OutputFormat::Gemtext).unwrap();
        assert_eq!(out, "# Hi\r\n* a\n");
    }

    #[test]
    fn test_tree_format() {
        let loader = DocumentLoader::from_string("# Hi\n");
        let out = render_document(&loader, OutputFormat::Tree).unwrap();
        assert!(out.contains("Hi"));
    }
}
