//! Built-in site rules
//!
//! This is replaceable data: deployments that need different sites or
//! different substitutions supply their own [`TransformTable`]. Each
//! substitution chain runs in a fixed order because later steps depend on
//! the output of earlier ones; the order is stated at each step. Plain text
//! with no site markup is a fixed point of both directions for every rule,
//! so `receive(send(x)) == x` holds on that subset.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{TransformError, TransformPair, TransformTable};

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("built-in pattern compiles")
}

// A value that is one empty rich-text line and nothing else.
static EMPTY_LEAD_PARA: Lazy<Regex> = Lazy::new(|| pattern(r"^<p><br></p>$"));
static EMPTY_LEAD_BREAK: Lazy<Regex> = Lazy::new(|| pattern(r"^<br>$"));

static LIST_ITEM_OPEN: Lazy<Regex> = Lazy::new(|| pattern(r"<li>"));
static LIST_ITEM_CLOSE: Lazy<Regex> = Lazy::new(|| pattern(r"</li>"));
static LIST_WRAPPER: Lazy<Regex> = Lazy::new(|| pattern(r"</?[uo]l>"));
static BREAK_TAG: Lazy<Regex> = Lazy::new(|| pattern(r"<br\s*/?>"));
static BREAK_THEN_PARA_CLOSE: Lazy<Regex> = Lazy::new(|| pattern(r"<br></p>"));
static PARA_CLOSE: Lazy<Regex> = Lazy::new(|| pattern(r"</p>"));
static PARA_OPEN: Lazy<Regex> = Lazy::new(|| pattern(r"<p>"));
static BOLD_TAG: Lazy<Regex> = Lazy::new(|| pattern(r"</?(?:strong|b)>"));
static ITALIC_TAG: Lazy<Regex> = Lazy::new(|| pattern(r"</?(?:em|i)>"));
static NBSP_ENTITY: Lazy<Regex> = Lazy::new(|| pattern(r"&nbsp;"));
static EMOJI_IMG: Lazy<Regex> = Lazy::new(|| pattern(r#"<img[^>]*?data-id="(:\w*:)"[^>]*?>"#));
static BOLD_MARKER_AFTER_WORD: Lazy<Regex> = Lazy::new(|| pattern(r"\b\*"));
static BOLD_MARKER_BEFORE_WORD: Lazy<Regex> = Lazy::new(|| pattern(r"\*\b"));
static MENTION_TAG: Lazy<Regex> = Lazy::new(|| pattern(r"</?ts-mention[^>]*?>"));
static GT_ENTITY: Lazy<Regex> = Lazy::new(|| pattern(r"&gt;"));
static LT_ENTITY: Lazy<Regex> = Lazy::new(|| pattern(r"&lt;"));
static AMP_ENTITY: Lazy<Regex> = Lazy::new(|| pattern(r"&amp;"));
static MD_BOLD: Lazy<Regex> = Lazy::new(|| pattern(r"\*\*(.+?)\*\*"));
static MD_ITALIC: Lazy<Regex> = Lazy::new(|| pattern(r"\*([^*\n]+)\*"));
static DOUBLE_ASTERISK: Lazy<Regex> = Lazy::new(|| pattern(r"\*\*"));

/// Serialized paragraph markup → plain markdown-flavored text
fn markup_to_plain(text: &str) -> String {
    // Bullet markers first: indent normalization below must see the
    // already-placed "- " markers.
    let text = LIST_ITEM_CLOSE.replace_all(text, "\n");
    let text = LIST_ITEM_OPEN.replace_all(&text, "- ");
    let text = LIST_WRAPPER.replace_all(&text, "");
    // Line structure.
    let text = BREAK_TAG.replace_all(&text, "\n");
    let text = PARA_CLOSE.replace_all(&text, "\n");
    let text = PARA_OPEN.replace_all(&text, "");
    // Inline emphasis.
    let text = BOLD_TAG.replace_all(&text, "**");
    let text = ITALIC_TAG.replace_all(&text, "*");
    // Whitespace-indent normalization, after bullet markers.
    let text = NBSP_ENTITY.replace_all(&text, " ");
    // Entities, ampersand last so it cannot re-form other entities.
    let text = GT_ENTITY.replace_all(&text, ">");
    let text = LT_ENTITY.replace_all(&text, "<");
    AMP_ENTITY.replace_all(&text, "&").into_owned()
}

/// Markdown emphasis markers → inline markup
///
/// Deliberately touches nothing but the markers, so text without markdown
/// markup passes through unchanged.
fn plain_to_markup(text: &str) -> String {
    // Bold before italic: a lone-asterisk pass would consume the doubled
    // markers first.
    let text = MD_BOLD.replace_all(text, "<strong>${1}</strong>");
    MD_ITALIC.replace_all(&text, "<em>${1}</em>").into_owned()
}

fn mail_send(text: &str) -> Result<String, TransformError> {
    // Remove the initial empty line the composer leaves behind.
    let text = EMPTY_LEAD_PARA.replace(text, "");
    let text = EMPTY_LEAD_BREAK.replace(&text, "");
    Ok(markup_to_plain(&text))
}

fn mail_receive(text: &str) -> Result<String, TransformError> {
    Ok(plain_to_markup(text))
}

fn chat_send(text: &str) -> Result<String, TransformError> {
    // Remove the initial empty line.
    let text = EMPTY_LEAD_PARA.replace(text, "");
    // Newlines: the break-before-close form first, then bare closes.
    let text = BREAK_THEN_PARA_CLOSE.replace_all(&text, "\n");
    let text = PARA_CLOSE.replace_all(&text, "\n");
    let text = PARA_OPEN.replace_all(&text, "");
    // Emojis back to their shortcodes.
    let text = EMOJI_IMG.replace_all(&text, "${1}");
    // Single-asterisk bold → doubled markers.
    let text = BOLD_MARKER_AFTER_WORD.replace_all(&text, "**");
    let text = BOLD_MARKER_BEFORE_WORD.replace_all(&text, "**");
    // Mentions and quotes.
    let text = MENTION_TAG.replace_all(&text, "");
    Ok(GT_ENTITY.replace_all(&text, ">").into_owned())
}

fn chat_receive(text: &str) -> Result<String, TransformError> {
    Ok(DOUBLE_ASTERISK.replace_all(text, "*").into_owned())
}

fn docs_send(text: &str) -> Result<String, TransformError> {
    Ok(markup_to_plain(text))
}

fn docs_receive(text: &str) -> Result<String, TransformError> {
    Ok(plain_to_markup(text))
}

/// Builds the built-in table
///
/// Order matters: more specific hosts would have to precede any broad
/// subdomain patterns added later.
pub fn default_table() -> TransformTable {
    TransformTable::new()
        .with_rule(
            r"mail\.google\.com",
            TransformPair {
                send: mail_send,
                receive: mail_receive,
            },
        )
        .and_then(|t| {
            t.with_rule(
                r"app\.slack\.com",
                TransformPair {
                    send: chat_send,
                    receive: chat_receive,
                },
            )
        })
        .and_then(|t| {
            t.with_rule(
                r"docs\.google\.com",
                TransformPair {
                    send: docs_send,
                    receive: docs_receive,
                },
            )
        })
        .expect("built-in table compiles")
}
