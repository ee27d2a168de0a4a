//! GHS hazard pictogram codes.
//!
//! Codes are an open set: the nine standard GHS pictograms get a display
//! glyph, anything else is shown as its literal text. The comma-joined text
//! form defined here is the one scalar encoding of the multi-valued `ghs`
//! field — every spreadsheet cell and every CLI flag goes through
//! [`join_codes`]/[`split_codes`], so the field survives formats that only
//! store scalar cell values.

/// Display glyphs for the standard GHS pictograms.
const GLYPHS: [(&str, &str); 9] = [
    ("GHS01", "💥"),
    ("GHS02", "🔥"),
    ("GHS03", "🧨"),
    ("GHS04", "💨"),
    ("GHS05", "🧪"),
    ("GHS06", "☠️"),
    ("GHS07", "⚠️"),
    ("GHS08", "👤"),
    ("GHS09", "🌊"),
];

/// Display glyph for a pictogram code.
///
/// Unknown codes are valid data, just unstyled: they come back unchanged.
pub fn glyph_for(code: &str) -> &str {
    let trimmed = code.trim();
    GLYPHS
        .iter()
        .find(|(known, _)| *known == trimmed)
        .map_or(code, |(_, glyph)| *glyph)
}

/// Join pictogram codes into their single-cell text form.
///
/// Each code is trimmed and empty entries are dropped, so a trailing
/// separator in hand-entered data never produces a phantom code.
pub fn join_codes(codes: &[String]) -> String {
    codes
        .iter()
        .map(|code| code.trim())
        .filter(|code| !code.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// Split the single-cell text form back into an ordered code sequence.
pub fn split_codes(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
