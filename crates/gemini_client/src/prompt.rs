use domain::Comment;

/// Build the classification prompt for `comments`.
///
/// The comments are embedded as a JSON array so quotes and newlines inside
/// them cannot break the list the model reads.
pub fn sentiment_prompt(comments: &[Comment]) -> String {
    let count = comments.len();
    let listed = serde_json::to_string(comments).unwrap_or_else(|_| "[]".to_string());

    format!(
        "You are a sentiment analysis expert. Your task is to analyze YouTube comments.\n\
         Classify each comment's sentiment strictly as 'Positive', 'Negative', or 'Neutral'.\n\
         You MUST provide a sentiment for every single comment. If a comment is ambiguous, \
         in another language, or you cannot determine the sentiment for any reason, you MUST \
         classify it as 'Neutral'. Do NOT skip any comments.\n\
         Your entire response must be ONLY a list of strings, like [\"Positive\", \"Negative\", \"Neutral\", ...].\n\
         The list must have exactly {count} items in it, one per comment, in the same order as the comments.\n\
         Do not add any introductory text, explanations, or code formatting. \
         Your response must start with '[' and end with ']'.\n\
         \n\
         Here are the {count} comments:\n\
         {listed}\n"
    )
}
