use tracing::debug;

use super::Judgment;

/// Decodes a judge reply into a [`Judgment`].
///
/// Models wrap the object in prose, markdown fences, or trailing chatter,
/// so the parser slices from the first `{` to the last `}` and decodes that
/// span. Any failure is `None`: an unparseable reply means the judge has no
/// opinion, it is never an error.
pub fn parse_judgment(raw: &str) -> Option<Judgment> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }

    match serde_json::from_str::<Judgment>(&raw[start..=end]) {
        Ok(judgment) => Some(judgment),
        Err(err) => {
            debug!(error = %err, "judge reply did not decode");
            None
        }
    }
}
