//! HTML rendering for the listing page.
//!
//! One self-contained page: a search form on top, the policy list below.
//! Submitting the form reloads the page with `?q=` and the server re-derives
//! the filtered view. Every record field is escaped before interpolation.

use crate::store::Policy;
use crate::util::escape_html;

pub fn render_listing(policies: &[Policy], term: &str) -> String {
    let mut out = String::with_capacity(2048 + policies.len() * 512);

    out.push_str(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Policy Hub</title>\n<style>\n",
    );
    out.push_str(PAGE_STYLE);
    out.push_str("</style>\n</head>\n<body>\n<div class=\"container\">\n<header class=\"header\">\n<h1>Policy Hub</h1>\n");
    out.push_str(&format!(
        "<form method=\"get\" action=\"/\">\n\
         <input type=\"text\" name=\"q\" placeholder=\"Search policies...\" value=\"{}\">\n\
         </form>\n</header>\n",
        escape_html(term)
    ));

    out.push_str("<ul class=\"policy-list\">\n");
    for policy in policies {
        // Null text columns render as blanks; the row itself still shows.
        out.push_str("<li class=\"policy-item\">\n");
        out.push_str(&format!(
            "<h2>{}</h2>\n",
            escape_html(policy.title.as_deref().unwrap_or(""))
        ));
        out.push_str(&format!(
            "<p class=\"meta\">{} &bull; {} &bull; {}</p>\n",
            policy.date,
            escape_html(policy.region.as_deref().unwrap_or("")),
            escape_html(policy.category.as_deref().unwrap_or(""))
        ));
        out.push_str(&format!(
            "<p>{}</p>\n",
            escape_html(policy.content.as_deref().unwrap_or(""))
        ));
        if let Some(link) = &policy.link {
            out.push_str(&format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Source</a>\n",
                escape_html(link)
            ));
        }
        out.push_str("</li>\n");
    }
    out.push_str("</ul>\n</div>\n</body>\n</html>\n");

    out
}

const PAGE_STYLE: &str = "\
.container { max-width: 800px; margin: 0 auto; padding: 1rem; font-family: sans-serif; }
.header { display: flex; flex-direction: column; align-items: center; margin-bottom: 1rem; }
.header h1 { margin: 0; font-size: 2rem; }
.header input { margin-top: 0.5rem; padding: 0.5rem; width: 100%; max-width: 400px; border: 1px solid #ccc; border-radius: 4px; }
.policy-list { list-style: none; padding: 0; }
.policy-item { border-bottom: 1px solid #eee; padding: 1rem 0; }
.policy-item h2 { margin: 0; font-size: 1.2rem; }
.policy-item .meta { font-size: 0.8rem; color: #555; }
.policy-item p { margin: 0.5rem 0; }
.policy-item a { color: #0070f3; text-decoration: none; }
";
