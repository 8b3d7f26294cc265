use std::collections::HashSet;

/// Strips all markup from grader feedback before it is stored.
///
/// The grading service returns free text that ends up rendered next to the
/// child's worksheet, so no tags survive; entities are left escaped.
pub fn clean_feedback(input: &str) -> String {
    ammonia::Builder::empty()
        .clean_content_tags(HashSet::from(["script", "style"]))
        .clean(input)
        .to_string()
        .trim()
        .to_string()
}
