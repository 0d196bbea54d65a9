//! Instructions sent to the model

pub const IMAGE_TO_MARKUP: &str = "Convert this image to responsive HTML with inline CSS styles.
Make the output look EXACTLY like the image with precise positioning.

Requirements:
1. Use position:absolute for text and UI elements with PRECISE top/left values in pixels to match exactly the image.
2. Set a position:relative container with appropriate width/height.
3. Preserve all colors, backgrounds, borders, and styling from the image exactly.
4. Match all font sizes, font styles, colors, and text formatting precisely.
5. Include proper styling for all elements including borders, backgrounds, shadows if present.
6. For images, use https://placehold.co/ with appropriate dimensions if needed.
7. Use only inline CSS styles with style attributes (not React style objects).
8. Make sure to set background-color for containers that have backgrounds.
9. Ensure all HTML elements have proper opening and closing tags.

DO NOT explain your work - respond ONLY with the complete, valid HTML code.";

/// Quiz instructions for `topic`
pub fn quiz(topic: &str, question_count: usize) -> String {
    format!(
        r#"Generate a quiz with {count} multiple-choice questions about "{topic}".
Each question should have 4 options with one correct answer.
Format the response as a JSON array with this structure:
[
  {{
    "question": "Question text goes here?",
    "options": ["Option A", "Option B", "Option C", "Option D"],
    "correctAnswer": "Option that is correct"
  }}
]
Don't include any other text in your response, just return the JSON array."#,
        count = question_count,
        topic = topic
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_prompt() {
        let prompt = quiz("Rust ownership", 10);
        assert!(prompt.starts_with(r#"Generate a quiz with 10 multiple-choice questions about "Rust ownership"."#));
        assert!(prompt.contains(r#""correctAnswer": "Option that is correct""#));
    }
}
