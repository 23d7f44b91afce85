// Personality chain prompt templates. Each stage feeds the previous stage's text
// into the next template.

pub const ANALYSIS_SYSTEM: &str = "You are a highly intelligent AI skilled in psychological analysis.";

pub const ANALYSIS_PROMPT: &str = "\
Act as an AI skilled in psychological analysis. Analyze the following text using the DISC and \
OCEAN personality frameworks and provide a structured analysis.

Text:
{combined_text}";

pub const NARRATIVE_SYSTEM: &str = "You are a highly intelligent AI skilled in creating narratives.";

pub const NARRATIVE_PROMPT: &str = "\
Based on the following DISC and OCEAN personality analysis, create a narrative that summarizes \
the candidate's personality and professional behavior.

Analysis:
{analysis}";

pub const FINAL_PROFILE_SYSTEM: &str =
    "You are a highly intelligent AI skilled in creating candidate profiles.";

pub const FINAL_PROFILE_PROMPT: &str = "\
Create a final candidate profile for this candidate named {name} to be presented to a hiring \
manager who is focused on cultural fit based on the following narrative:

Narrative:
{narrative}";
