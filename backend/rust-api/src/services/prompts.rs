use crate::models::Selection;

pub fn lesson_prompt(selection: &Selection) -> String {
    format!(
        "Create a comprehensive lesson on {topic} for a {level} level student.\n\
         Subject: {subject}\n\
         \n\
         Include:\n\
         1) Clear Learning Objectives\n\
         2) Detailed Explanation with examples (use Markdown and LaTeX for formulas if applicable).\n\
         3) Practical Applications\n\
         4) Summary of Key Concepts\n\
         5) Common mistakes to avoid\n\
         \n\
         Keep it between 400-500 words and use clear, engaging language. Format the output using Markdown.",
        topic = selection.topic,
        level = selection.level,
        subject = selection.subject,
    )
}

pub fn quiz_prompt(selection: &Selection) -> String {
    format!(
        "Create a 5-question assessment on {topic} ({subject}) for {level} level students.\n\
         Include multiple choice questions with 4 options each.\n\
         Format as a single, valid JSON object with a key \"questions\" which is a list of question objects.\n\
         Each question object must have these exact keys: \"question\", \"options\" (a list of 4 strings), \
         \"answer\" (the correct string from options), and \"explanation\".\n\
         Make questions progressively harder.",
        topic = selection.topic,
        level = selection.level,
        subject = selection.subject,
    )
}
