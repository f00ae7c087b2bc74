//! Trademark annotation of visible text.
//!
//! Walks `head title` and everything under `body`, skipping script content,
//! and rewrites each element's direct child text nodes word by word. A word
//! of exactly six characters gets a trademark sign appended; bracketed and
//! quoted words are peeled recursively; internal punctuation splits a word
//! into independently annotated parts.
//!
//! The rule is deliberately naive and reproduced literally; it makes no
//! claim about natural-language tokenization.

use kuchiki::NodeRef;

/// Characters that split a word into independently annotated parts.
const PUNCTUATION: [char; 8] = ['.', ',', ':', ';', '!', '?', '/', '\\'];

/// Bracket and quote characters peeled off the edges of a word.
const QUOTES_AND_BRACKETS: [char; 8] = ['\'', '"', '«', '»', '(', ')', '[', ']'];

/// The glyph appended to qualifying words.
const MARK: char = '™';

/// Annotate every visible text node in the document.
///
/// Visits `head title` and each element under `body` in document order.
/// Script content is never rewritten. Only direct child text nodes of the
/// visited element are processed; descendant text belongs to its own
/// element's visit.
pub fn annotate_document(document: &NodeRef) {
    let Ok(elements) = document.select("head title, body *") else {
        return;
    };

    for element in elements {
        if element.name.local.as_ref() == "script" {
            continue;
        }

        for child in element.as_node().children() {
            if let Some(text) = child.as_text() {
                let mut payload = text.borrow_mut();
                let rewritten = annotate_text(payload.as_str());
                *payload = rewritten;
            }
        }
    }
}

/// Apply the word rule to a whole text payload.
///
/// Splitting on the space character keeps consecutive delimiters as empty
/// words, which pass through unchanged and reassemble losslessly.
pub fn annotate_text(text: &str) -> String {
    text.split(' ')
        .map(annotate)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Annotate a single word.
pub fn annotate(word: &str) -> String {
    let cleared = word.replace(' ', "").replace("&nbsp;", "");
    if cleared.trim().is_empty() {
        return word.to_string();
    }

    // The first punctuation character found (left to right) splits the whole
    // word; each part is annotated on its own and the splitter is the joiner.
    if let Some(split_char) = cleared.chars().find(|c| PUNCTUATION.contains(c)) {
        return cleared
            .split(split_char)
            .map(|part| annotate_core(part, "", ""))
            .collect::<Vec<_>>()
            .join(&split_char.to_string());
    }

    annotate_core(&cleared, "", "")
}

/// The recursive core of the word rule.
///
/// Exactly six characters with no bracket or quote anywhere → append the
/// mark. Longer words with a bracket or quote at either edge shed every
/// occurrence of that edge character and recurse, accumulating the shed
/// characters into `prefix` and `suffix`. Everything else comes back as it
/// arrived, reattached between the accumulated edges.
fn annotate_core(word: &str, prefix: &str, suffix: &str) -> String {
    let length = word.chars().count();
    let has_bracket = word.chars().any(|c| QUOTES_AND_BRACKETS.contains(&c));

    if length == 6 && !has_bracket {
        return format!("{prefix}{word}{MARK}{suffix}");
    }

    if length > 6 && has_bracket {
        let first = word
            .chars()
            .next()
            .filter(|c| QUOTES_AND_BRACKETS.contains(c));
        let last = word
            .chars()
            .last()
            .filter(|c| QUOTES_AND_BRACKETS.contains(c));

        if first.is_some() || last.is_some() {
            // Whole-string removal of the matched edge characters, not just
            // the edge positions.
            let mut stripped = word.to_string();
            if let Some(c) = first {
                stripped = stripped.replace(c, "");
            }
            if let Some(c) = last {
                stripped = stripped.replace(c, "");
            }

            let prefix = match first {
                Some(c) => format!("{prefix}{c}"),
                None => prefix.to_string(),
            };
            let suffix = match last {
                Some(c) => format!("{suffix}{c}"),
                None => suffix.to_string(),
            };

            return annotate_core(&stripped, &prefix, &suffix);
        }
    }

    format!("{prefix}{word}{suffix}")
}
