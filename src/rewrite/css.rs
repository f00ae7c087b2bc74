//! Font-face source extraction from embedded style text.

use lightningcss::rules::font_face::{FontFaceProperty, Source};
use lightningcss::rules::CssRule;
use lightningcss::stylesheet::{ParserOptions, StyleSheet};

/// Extract every URL referenced as a `src` inside a `@font-face` rule.
///
/// Both declaration forms are covered: a single URL term and a
/// comma-separated list of terms. Unparseable style text yields an empty
/// list; there are no fonts to localize in markup we cannot read.
pub fn extract_font_urls(css: &str) -> Vec<String> {
    let stylesheet = match StyleSheet::parse(css, ParserOptions::default()) {
        Ok(stylesheet) => stylesheet,
        Err(err) => {
            tracing::debug!(error = %err, "Style text did not parse; no fonts to localize");
            return Vec::new();
        }
    };

    let mut urls = Vec::new();
    for rule in &stylesheet.rules.0 {
        let CssRule::FontFace(face) = rule else {
            continue;
        };
        for property in &face.properties {
            let FontFaceProperty::Source(sources) = property else {
                continue;
            };
            for source in sources {
                if let Source::Url(url_source) = source {
                    urls.push(url_source.url.url.to_string());
                }
            }
        }
    }
    urls
}
