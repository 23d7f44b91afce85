// Résumé parsing prompt templates.

pub const RESUME_PARSE_SYSTEM: &str =
    "You are a highly intelligent AI skilled in parsing and structuring resume information.";

pub const RESUME_PARSE_PROMPT: &str = r#"Act as an advanced AI capable of parsing resume texts to extract key information. Analyze the given resume text, identify the candidate's name and the organizations they have worked for, and output this information in a structured JSON format. You will only output the JSON data.

Output the extracted information in JSON format like this:
{
  "name": "Candidate Name",
  "contact": "The email address would normally go here, but return omitted for privacy reasons.",
  "organizations": ["List", "Of", "Current", "Prior", "Organizations", "Here"]
}

Parse the following resume text into the required JSON format:
{resume_text}"#;
