use crate::candidate::Candidate;

/// System directive pinning the reply format. The judge must answer with a
/// bare JSON object so [`parse_judgment`](super::parse_judgment) can slice
/// it out even when the model wraps it in prose or code fences.
pub const SYSTEM_DIRECTIVE: &str = "You pick the page element that best matches a user's request. \
You will get a query and a numbered list of elements, one per line, as: \
index | kind | \"label\" | href. \
Reply with exactly one JSON object: {\"index\": <int>, \"reason\": \"<short explanation>\"}. \
index is the number of the best-matching element, or -1 if none match. \
No other text.";

/// Renders the query and the candidate roster into the judge prompt.
///
/// Line order defines the index space the verdict refers to, so callers
/// must pass the same slice they will look the returned index up in.
pub fn build_prompt(query: &str, candidates: &[Candidate]) -> String {
    let mut prompt = String::with_capacity(64 + candidates.len() * 48);
    prompt.push_str("Query: ");
    prompt.push_str(query);
    prompt.push_str("\n\nElements:\n");

    for (i, c) in candidates.iter().enumerate() {
        prompt.push_str(&i.to_string());
        prompt.push_str(" | ");
        prompt.push_str(c.kind.as_str());
        prompt.push_str(" | \"");
        prompt.push_str(&c.text);
        prompt.push('"');
        if let Some(href) = &c.href {
            prompt.push_str(" | ");
            prompt.push_str(href);
        }
        prompt.push('\n');
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::{Candidate, CandidateKind, Region};

    #[test]
    fn test_prompt_lines_carry_index_kind_label_href() {
        let candidates = vec![
            Candidate::new(
                CandidateKind::Link,
                "Student Portal",
                Some("/portal".to_string()),
                Region::Nav,
            ),
            Candidate::new(CandidateKind::Button, "Apply Now", None, Region::Body),
        ];
        let prompt = build_prompt("student portal", &candidates);

        assert!(prompt.contains("Query: student portal"));
        assert!(prompt.contains("0 | link | \"Student Portal\" | /portal\n"));
        assert!(prompt.contains("1 | button | \"Apply Now\"\n"));
    }

    #[test]
    fn test_prompt_index_space_matches_slice_order() {
        let candidates: Vec<_> = (0..3)
            .map(|i| {
                Candidate::new(CandidateKind::Heading, format!("H{i}"), None, Region::Body)
            })
            .collect();
        let prompt = build_prompt("q", &candidates);

        let roster: Vec<_> = prompt
            .lines()
            .filter(|l| l.contains(" | heading | "))
            .collect();
        assert_eq!(roster.len(), 3);
        assert!(roster[0].starts_with("0 | "));
        assert!(roster[2].starts_with("2 | "));
    }
}
