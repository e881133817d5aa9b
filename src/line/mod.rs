//! Line encoding: markup translation seam and width-limited splitting.

mod encoder;
mod translate;

pub use encoder::{split, EncodedLine, LineEncoder, LINE_WIDTH, MAX_LINE_LEN, TEAM_NAME_WIDTH};
pub use translate::{PlainTranslator, Translator};
