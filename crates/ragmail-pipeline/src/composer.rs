//! Deterministic template selection and email body assembly. No model calls.

use ragmail_core::TemplateType;

/// Fixed subject line used for every email.
pub const SUBJECT: &str = "Prospective Graduate Student | IELTS 7.0 | BSCS: CGPA (3.37/4.00) | SL@ Stanford CIP | 10X International Hackathons";

/// Fixed highlights block, constant across all emails.
pub const HIGHLIGHTS: &str = "\
A few highlights from my profile:
- Selected as Section Leader at Stanford University's Code in Place over 17,000+ global applicants to teach Python Programming.
- Winner, Harvard CS50 Puzzle Day 2025
- Participant in 10+ international AI hackathons (Lablab.ai)
- Ranked 99th globally at M{IT}2 Informatics Tournament 2025
- Ranked participant in Meta Hacker Cup 2024 (13k+ competitors)
- Voluntarily taught 30+ hours of Web Development and IELTS to underprivileged students.";

/// Closing and signature for the generic template.
pub const CLOSING: &str = "\
I have attached my CV and relevant documents for your review. I would be truly grateful for an opportunity to discuss how my background and research interests could align with your group's ongoing projects.

Best regards,
Zain Azhar";

/// Pick the template from the request shape.
///
/// 1 when no paper reference is given; 3 when a paper is given and the
/// caller forced a specific project; 2 when a paper is given without a
/// forced project.
pub fn select_template(has_paper: bool, forced_project: bool) -> TemplateType {
    if !has_paper {
        TemplateType::Generic
    } else if forced_project {
        TemplateType::PaperSpecific
    } else {
        TemplateType::PaperGeneric
    }
}

/// Assemble the full email body for the chosen template.
pub fn compose_body(
    template: TemplateType,
    professor_name: &str,
    university_name: &str,
    research_area: &str,
    paper_title: Option<&str>,
    paper_summary: Option<&str>,
    project_paragraph: &str,
) -> String {
    match (template, paper_title) {
        // Templates 2 and 3 differ only in classification, not in rendering.
        (TemplateType::PaperGeneric | TemplateType::PaperSpecific, Some(title)) => render_paper(
            professor_name,
            university_name,
            research_area,
            title,
            paper_summary,
            project_paragraph,
        ),
        _ => render_generic(
            professor_name,
            university_name,
            research_area,
            project_paragraph,
        ),
    }
}

fn render_generic(
    professor_name: &str,
    university_name: &str,
    research_area: &str,
    project_paragraph: &str,
) -> String {
    format!(
        "Dear {professor_name},\n\nI hope this message finds you well. My name is Zain Azhar, and I am a final-year Computer Science undergraduate at the University of Agriculture Faisalabad. I am very interested in pursuing graduate research under your supervision at {university_name}, particularly in the areas of {research_area}.\n\n{project_paragraph}\n\n{HIGHLIGHTS}\n\n{CLOSING}"
    )
}

fn render_paper(
    professor_name: &str,
    university_name: &str,
    research_area: &str,
    paper_title: &str,
    paper_summary: Option<&str>,
    project_paragraph: &str,
) -> String {
    let mut paper_line = format!(
        "I was particularly interested in your recent paper, \"{}\"",
        paper_title
    );
    match paper_summary {
        Some(summary) => paper_line.push_str(&format!(", which addresses {}.", summary)),
        None => paper_line.push('.'),
    }

    format!(
        "Dear {professor_name},\n\nI hope this message finds you well. My name is Zain Azhar, and I am a final-year Computer Science undergraduate at the University of Agriculture Faisalabad. I am eager to contribute to research under your supervision in the field of {research_area} as a prospective graduate student at {university_name}.\n\n{paper_line} {project_paragraph}\n\n{HIGHLIGHTS}\n\nI have attached my CV and relevant documents for your review. I would be happy to arrange a virtual meeting at your convenience.\n\nBest regards,\nZain Azhar"
    )
}
