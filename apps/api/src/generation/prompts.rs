// All LLM prompt constants for the generation operations. Each system prompt
// carries its own JSON-only instructions alongside its role.

/// System prompt for draft improvement — enforces JSON-only output.
pub const IMPROVE_SYSTEM: &str = "You are an expert editor for job-application emails. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Draft improvement prompt template. Replace `{draft_message}` before sending.
pub const IMPROVE_PROMPT_TEMPLATE: &str = r#"Rewrite the following job-application email draft. Fix grammar, spelling, and awkward phrasing, and give it a professional but warm tone.

Rules:
1. Keep the SAME language the draft is written in.
2. Keep the meaning and approximate length — this is a rewrite, not a new letter.
3. Do NOT invent facts, names, or qualifications that are not in the draft.

Return a JSON object with this EXACT schema (no extra fields):
{"message": "the improved draft"}

DRAFT:
{draft_message}"#;

/// System prompt for cover letter generation — enforces JSON-only output.
pub const COVER_LETTER_SYSTEM: &str = "You are an expert cover letter writer. \
    You write grounded, specific letters from the candidate's real CV. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT invent facts not present in the CV.";

/// Cover letter prompt template.
/// Replace: {cv_text}, {job_description}, {tone}, {additional_instructions}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Write a cover letter for a job application based on the CV and job description below.

TONE: {tone}

ADDITIONAL INSTRUCTIONS from the candidate (may be empty):
{additional_instructions}

CV TEXT (source of truth — ONLY use facts from here):
{cv_text}

JOB DESCRIPTION:
{job_description}

Rules:
1. Connect concrete CV facts to concrete requirements in the job description.
2. Write in the language of the job description.
3. Keep it to a length appropriate for a cover letter — no padding.

Return a JSON object with this EXACT schema (no extra fields):
{"letter": "the cover letter"}"#;

/// System prompt for the personalized application — enforces JSON-only output.
pub const APPLICATION_SYSTEM: &str = "You are an expert job-application writer \
    drafting a complete application email (subject and body) from a candidate's CV. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT invent facts not present in the CV.";

/// Personalized application prompt template.
/// Replace: {recipient_email}, {cv_text}, {job_description}, {personal_notes}
pub const APPLICATION_PROMPT_TEMPLATE: &str = r#"Draft a personalized job-application email for the candidate whose CV appears below.

RECIPIENT: {recipient_email}

Infer the employer from the recipient's email domain:
- If the domain clearly identifies a company, tailor the letter to that company and what it likely does.
- If the domain is generic or unrecognizable, write a strong generic letter the candidate can adapt, without guessing at a company.

CV TEXT (source of truth — ONLY use facts from here):
{cv_text}

JOB DESCRIPTION (may be empty):
{job_description}

PERSONAL NOTES from the candidate (may be empty):
{personal_notes}

Rules:
1. Phrase personal notes diplomatically — as preferences to discuss, NEVER as demands.
2. Write in the language of the job description, or of the CV when no job description is given.
3. The subject line must be specific and professional.
4. Keep the message short enough to read as an email, not an essay.

Return a JSON object with this EXACT schema (no extra fields):
{"subject": "the email subject", "message": "the email body as plain text"}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_improve_template_has_its_placeholder() {
        assert!(IMPROVE_PROMPT_TEMPLATE.contains("{draft_message}"));
    }

    #[test]
    fn test_cover_letter_template_has_all_placeholders() {
        for p in ["{cv_text}", "{job_description}", "{tone}", "{additional_instructions}"] {
            assert!(COVER_LETTER_PROMPT_TEMPLATE.contains(p), "missing {p}");
        }
    }

    #[test]
    fn test_application_template_has_all_placeholders() {
        for p in ["{recipient_email}", "{cv_text}", "{job_description}", "{personal_notes}"] {
            assert!(APPLICATION_PROMPT_TEMPLATE.contains(p), "missing {p}");
        }
    }
}
