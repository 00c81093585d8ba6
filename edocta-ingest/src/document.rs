//! Input document handed to a bank parser.

/// A single statement export, borrowed for the duration of one parse call.
///
/// Most banks export text (CSV, pipe/tab-delimited, fixed-width); HSBC
/// exports a spreadsheet, carried as raw workbook bytes.
#[derive(Debug, Clone, Copy)]
pub enum Document<'a> {
    Text(&'a str),
    Workbook(&'a [u8]),
}

impl<'a> Document<'a> {
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            Document::Text(t) => Some(t),
            Document::Workbook(_) => None,
        }
    }

    pub fn as_workbook(&self) -> Option<&'a [u8]> {
        match self {
            Document::Workbook(b) => Some(b),
            Document::Text(_) => None,
        }
    }
}

impl<'a> From<&'a str> for Document<'a> {
    fn from(text: &'a str) -> Self {
        Document::Text(text)
    }
}
