//! SVG layout of a resume.
//!
//! Sections are stacked top to bottom inside a single `<g>` carrying the content
//! anchor id. Empty sections are skipped entirely; only the name header is
//! always present, falling back to a placeholder name.

use super::text::{self, Weight};
use super::{MarkupGenerator, RenderedDocument, CONTENT_ANCHOR, CONTENT_WIDTH_PX};
use crate::resume::{non_empty, Certification, Education, Project, ResumeData, WorkExperience};
use chrono::NaiveDate;

const SIZE_NAME: f32 = 28.0;
const SIZE_SECTION: f32 = 14.0;
const SIZE_TITLE: f32 = 12.0;
const SIZE_BODY: f32 = 11.0;
const LINE_SPACING: f32 = 1.4;
const BULLET: &str = "\u{2022}";

/// Lays a resume out as a fixed-width SVG document.
#[derive(Debug, Clone)]
pub struct SvgMarkup {
    pub width: f32,
    pub padding: f32,
    pub font_family: String,
}

impl Default for SvgMarkup {
    fn default() -> Self {
        SvgMarkup {
            width: CONTENT_WIDTH_PX,
            padding: 40.0,
            font_family: "Inter, Helvetica, Arial, sans-serif".to_string(),
        }
    }
}

#[derive(Copy, Clone)]
enum Align {
    Start,
    Middle,
    End,
}

impl Align {
    fn text_anchor(self) -> &'static str {
        match self {
            Align::Start => "start",
            Align::Middle => "middle",
            Align::End => "end",
        }
    }
}

/// Accumulates positioned elements and tracks the running content height.
struct Layout {
    body: String,
    y: f32,
    left: f32,
    right: f32,
}

impl Layout {
    fn new(width: f32, padding: f32) -> Layout {
        Layout {
            body: String::new(),
            y: padding,
            left: padding,
            right: width - padding,
        }
    }

    fn content_width(&self) -> f32 {
        self.right - self.left
    }

    fn text_at(&mut self, class: &str, x: f32, baseline: f32, align: Align, text: &str) {
        self.body.push_str(&format!(
            "<text class=\"{class}\" x=\"{x:.2}\" y=\"{baseline:.2}\" text-anchor=\"{}\">{}</text>\n",
            align.text_anchor(),
            html_escape::encode_text(text),
        ));
    }

    /// Writes one already-wrapped line and advances the cursor.
    fn line(&mut self, class: &str, size: f32, x: f32, align: Align, text: &str) {
        let baseline = self.y + size;
        self.text_at(class, x, baseline, align, text);
        self.y += size * LINE_SPACING;
    }

    fn paragraph(&mut self, class: &str, size: f32, weight: Weight, align: Align, text: &str) {
        let x = match align {
            Align::Start => self.left,
            Align::Middle => (self.left + self.right) / 2.0,
            Align::End => self.right,
        };
        for line in text::wrap(text, self.content_width(), size, weight) {
            self.line(class, size, x, align, &line);
        }
    }

    /// Bulleted paragraph with a hanging indent.
    fn bullet(&mut self, text: &str) {
        let indent = text::width_of_text("\u{2022} ", SIZE_BODY, Weight::Regular);
        let lines = text::wrap(text, self.content_width() - indent, SIZE_BODY, Weight::Regular);
        for (i, line) in lines.into_iter().enumerate() {
            if i == 0 {
                let baseline = self.y + SIZE_BODY;
                let left = self.left;
                self.text_at("body", left, baseline, Align::Start, BULLET);
            }
            let x = self.left + indent;
            self.line("body", SIZE_BODY, x, Align::Start, &line);
        }
    }

    /// Free text where each non-empty line is its own paragraph, bulleted when
    /// there is more than one.
    fn description(&mut self, text: &str) {
        let lines: Vec<&str> = text
            .lines()
            .map(|l| l.trim().trim_start_matches(['-', '*', '\u{2022}']).trim())
            .filter(|l| !l.is_empty())
            .collect();
        match lines.as_slice() {
            [] => {}
            [single] => self.paragraph("body", SIZE_BODY, Weight::Regular, Align::Start, single),
            many => {
                for line in many {
                    self.bullet(line);
                }
            }
        }
    }

    fn section(&mut self, title: &str) {
        self.gap(10.0);
        self.line("section", SIZE_SECTION, self.left, Align::Start, &title.to_uppercase());
        let rule_y = self.y - SIZE_SECTION * 0.2;
        self.body.push_str(&format!(
            "<line class=\"rule\" x1=\"{:.2}\" y1=\"{rule_y:.2}\" x2=\"{:.2}\" y2=\"{rule_y:.2}\"/>\n",
            self.left, self.right,
        ));
        self.gap(4.0);
    }

    /// Bold entry title with an optional right-aligned date range on the first line.
    fn entry_title(&mut self, title: &str, dates: Option<&str>) {
        let date_width = dates
            .map(|d| text::width_of_text(d, SIZE_BODY, Weight::Regular) + 12.0)
            .unwrap_or_default();
        let lines = text::wrap(
            title,
            self.content_width() - date_width,
            SIZE_TITLE,
            Weight::Bold,
        );
        if lines.is_empty() {
            if let Some(dates) = dates {
                self.line("meta", SIZE_BODY, self.right, Align::End, dates);
            }
            return;
        }
        for (i, line) in lines.into_iter().enumerate() {
            if i == 0 {
                if let Some(dates) = dates {
                    let baseline = self.y + SIZE_TITLE;
                    let right = self.right;
                    self.text_at("meta", right, baseline, Align::End, dates);
                }
            }
            self.line("title", SIZE_TITLE, self.left, Align::Start, &line);
        }
    }

    fn meta(&mut self, parts: &[Option<&str>]) {
        let joined = join_present(parts, " \u{00b7} ");
        if !joined.is_empty() {
            self.paragraph("meta", SIZE_BODY, Weight::Regular, Align::Start, &joined);
        }
    }

    fn gap(&mut self, height: f32) {
        self.y += height;
    }
}

fn join_present(parts: &[Option<&str>], separator: &str) -> String {
    parts
        .iter()
        .flatten()
        .copied()
        .collect::<Vec<&str>>()
        .join(separator)
}

/// Formats `YYYY-MM` or `YYYY-MM-DD` as `Mon YYYY`; anything else is kept verbatim.
fn format_month(value: &str) -> String {
    let value = value.trim();
    NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .map(|date| date.format("%b %Y").to_string())
        .unwrap_or_else(|_| value.to_string())
}

fn date_range(start: Option<&str>, end: Option<&str>, current: bool) -> Option<String> {
    let start = start.map(format_month);
    let end = end.map(format_month);
    match (start, end) {
        (Some(start), _) if current => Some(format!("{start} \u{2013} Present")),
        (Some(start), Some(end)) => Some(format!("{start} \u{2013} {end}")),
        (Some(start), None) => Some(format!("{start} \u{2013} Present")),
        (None, Some(end)) => Some(end),
        (None, None) if current => Some("Present".to_string()),
        (None, None) => None,
    }
}

fn work_is_empty(job: &WorkExperience) -> bool {
    [
        &job.job_title,
        &job.company,
        &job.location,
        &job.start_date,
        &job.end_date,
        &job.description,
    ]
    .into_iter()
    .all(|f| non_empty(f).is_none())
}

fn education_is_empty(edu: &Education) -> bool {
    [
        &edu.degree,
        &edu.field_of_study,
        &edu.institution,
        &edu.location,
        &edu.start_date,
        &edu.end_date,
        &edu.gpa,
        &edu.description,
    ]
    .into_iter()
    .all(|f| non_empty(f).is_none())
}

fn certification_is_empty(cert: &Certification) -> bool {
    [&cert.name, &cert.issuer, &cert.date, &cert.credential_id]
        .into_iter()
        .all(|f| non_empty(f).is_none())
}

fn project_is_empty(project: &Project) -> bool {
    [&project.name, &project.description, &project.link]
        .into_iter()
        .all(|f| non_empty(f).is_none())
        && project.technologies.is_empty()
}

impl SvgMarkup {
    fn header(&self, layout: &mut Layout, resume: &ResumeData) {
        layout.paragraph(
            "name",
            SIZE_NAME,
            Weight::Bold,
            Align::Middle,
            &resume.display_name(),
        );

        let contact = join_present(
            &[
                non_empty(&resume.email),
                non_empty(&resume.phone),
                non_empty(&resume.location),
            ],
            " | ",
        );
        if !contact.is_empty() {
            layout.paragraph("contact", SIZE_BODY, Weight::Regular, Align::Middle, &contact);
        }

        let links = join_present(
            &[
                non_empty(&resume.linkedin),
                non_empty(&resume.github),
                non_empty(&resume.website),
            ],
            " | ",
        );
        if !links.is_empty() {
            layout.paragraph("contact", SIZE_BODY, Weight::Regular, Align::Middle, &links);
        }
    }

    fn work_experience(&self, layout: &mut Layout, jobs: &[WorkExperience]) {
        let jobs: Vec<&WorkExperience> = jobs.iter().filter(|j| !work_is_empty(j)).collect();
        if jobs.is_empty() {
            return;
        }
        layout.section("Work Experience");
        for job in jobs {
            let dates = date_range(
                non_empty(&job.start_date),
                non_empty(&job.end_date),
                job.current,
            );
            layout.entry_title(non_empty(&job.job_title).unwrap_or_default(), dates.as_deref());
            layout.meta(&[non_empty(&job.company), non_empty(&job.location)]);
            if let Some(description) = non_empty(&job.description) {
                layout.description(description);
            }
            layout.gap(6.0);
        }
    }

    fn education(&self, layout: &mut Layout, entries: &[Education]) {
        let entries: Vec<&Education> = entries.iter().filter(|e| !education_is_empty(e)).collect();
        if entries.is_empty() {
            return;
        }
        layout.section("Education");
        for edu in entries {
            let title = match (non_empty(&edu.degree), non_empty(&edu.field_of_study)) {
                (Some(degree), Some(field)) => format!("{degree} in {field}"),
                (Some(degree), None) => degree.to_string(),
                (None, Some(field)) => field.to_string(),
                (None, None) => String::new(),
            };
            let dates = date_range(non_empty(&edu.start_date), non_empty(&edu.end_date), false);
            layout.entry_title(&title, dates.as_deref());
            layout.meta(&[non_empty(&edu.institution), non_empty(&edu.location)]);
            if let Some(gpa) = non_empty(&edu.gpa) {
                layout.paragraph(
                    "body",
                    SIZE_BODY,
                    Weight::Regular,
                    Align::Start,
                    &format!("GPA: {gpa}"),
                );
            }
            if let Some(description) = non_empty(&edu.description) {
                layout.description(description);
            }
            layout.gap(6.0);
        }
    }

    fn certifications(&self, layout: &mut Layout, certs: &[Certification]) {
        let certs: Vec<&Certification> =
            certs.iter().filter(|c| !certification_is_empty(c)).collect();
        if certs.is_empty() {
            return;
        }
        layout.section("Certifications");
        for cert in certs {
            let date = non_empty(&cert.date).map(format_month);
            layout.entry_title(non_empty(&cert.name).unwrap_or_default(), date.as_deref());
            let credential = non_empty(&cert.credential_id).map(|id| format!("Credential ID: {id}"));
            layout.meta(&[non_empty(&cert.issuer), credential.as_deref()]);
            layout.gap(4.0);
        }
    }

    fn projects(&self, layout: &mut Layout, projects: &[Project]) {
        let projects: Vec<&Project> = projects.iter().filter(|p| !project_is_empty(p)).collect();
        if projects.is_empty() {
            return;
        }
        layout.section("Projects");
        for project in projects {
            layout.entry_title(non_empty(&project.name).unwrap_or_default(), None);
            let technologies = project.technologies.items().join(", ");
            if !technologies.is_empty() {
                layout.meta(&[Some(technologies.as_str())]);
            }
            if let Some(description) = non_empty(&project.description) {
                layout.description(description);
            }
            if let Some(link) = non_empty(&project.link) {
                layout.paragraph("contact", SIZE_BODY, Weight::Regular, Align::Start, link);
            }
            layout.gap(6.0);
        }
    }

    fn list_section(&self, layout: &mut Layout, title: &str, items: Vec<String>) {
        if items.is_empty() {
            return;
        }
        layout.section(title);
        layout.paragraph(
            "body",
            SIZE_BODY,
            Weight::Regular,
            Align::Start,
            &items.join(&format!(" {BULLET} ")),
        );
    }

    fn stylesheet(&self) -> String {
        let family = html_escape::encode_text(&self.font_family);
        format!(
            "text {{ font-family: {family}; }}\n\
             .name {{ font-size: {SIZE_NAME}px; font-weight: 700; fill: #111111; }}\n\
             .contact {{ font-size: {SIZE_BODY}px; fill: #555555; }}\n\
             .section {{ font-size: {SIZE_SECTION}px; font-weight: 700; fill: #1a3c6e; }}\n\
             .title {{ font-size: {SIZE_TITLE}px; font-weight: 700; fill: #111111; }}\n\
             .meta {{ font-size: {SIZE_BODY}px; font-style: italic; fill: #555555; }}\n\
             .body {{ font-size: {SIZE_BODY}px; fill: #222222; }}\n\
             .rule {{ stroke: #1a3c6e; stroke-width: 1; }}\n"
        )
    }
}

impl MarkupGenerator for SvgMarkup {
    fn generate(&self, resume: &ResumeData) -> RenderedDocument {
        let mut layout = Layout::new(self.width, self.padding);

        self.header(&mut layout, resume);
        if let Some(summary) = non_empty(&resume.professional_summary) {
            layout.section("Professional Summary");
            layout.description(summary);
        }
        self.work_experience(&mut layout, &resume.work_experience);
        self.education(&mut layout, &resume.education);
        self.list_section(&mut layout, "Skills", resume.skills.items());
        self.projects(&mut layout, &resume.projects);
        self.certifications(&mut layout, &resume.certifications);
        self.list_section(&mut layout, "Languages", resume.languages.items());

        let height = (layout.y + self.padding).ceil();
        let width = self.width;
        let svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">\n\
             <style>\n{}</style>\n\
             <rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\" fill=\"#ffffff\"/>\n\
             <g id=\"{CONTENT_ANCHOR}\">\n{}</g>\n\
             </svg>\n",
            self.stylesheet(),
            layout.body,
        );

        log::debug!("laid out resume markup at {width}x{height}px");
        RenderedDocument {
            svg,
            width,
            height,
            anchor: CONTENT_ANCHOR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::{sample, WorkExperienceBuilder};

    #[test]
    fn empty_resume_still_shows_placeholder_name() {
        let doc = SvgMarkup::default().generate(&ResumeData::default());
        assert!(doc.svg.contains("Your Name"));
        assert!(doc.has_anchor());
        assert!(doc.height > 0.0);
        assert!(!doc.svg.contains("WORK EXPERIENCE"));
    }

    #[test]
    fn name_only_resume_has_no_experience_or_education() {
        let resume = ResumeData {
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            ..Default::default()
        };
        let doc = SvgMarkup::default().generate(&resume);
        assert!(doc.svg.contains("Ada Lovelace"));
        assert!(!doc.svg.contains("WORK EXPERIENCE"));
        assert!(!doc.svg.contains("EDUCATION"));
        assert!(!doc.svg.contains("SKILLS"));
    }

    #[test]
    fn escapes_markup_in_user_text() {
        let resume = ResumeData {
            first_name: Some("<script>".to_string()),
            professional_summary: Some("R&D lead".to_string()),
            ..Default::default()
        };
        let doc = SvgMarkup::default().generate(&resume);
        assert!(doc.svg.contains("&lt;script&gt;"));
        assert!(doc.svg.contains("R&amp;D lead"));
        assert!(!doc.svg.contains("<script>"));
    }

    #[test]
    fn sections_write_a_title_and_a_rule() {
        let mut layout = Layout::new(794.0, 40.0);
        layout.section("Skills");
        let lines: Vec<&str> = layout.body.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(r#"<text class="section" x="40.00""#));
        assert!(lines[0].ends_with(">SKILLS</text>"));
        assert!(lines[1].starts_with(r#"<line class="rule" x1="40.00""#));
        assert!(lines[1].contains(r#"x2="754.00""#));
    }

    #[test]
    fn height_grows_with_content() {
        let short = SvgMarkup::default().generate(&ResumeData::default());
        let full = SvgMarkup::default().generate(&sample::generate());
        assert!(full.height > short.height);
        assert!(full.svg.contains("WORK EXPERIENCE"));
        assert!(full.svg.contains("EDUCATION"));
        assert!(full.svg.contains("SKILLS"));
        assert!(full.svg.contains("LANGUAGES"));
    }

    #[test]
    fn blank_entries_do_not_open_a_section() {
        let resume = ResumeData {
            work_experience: vec![WorkExperience::default()],
            ..Default::default()
        };
        let doc = SvgMarkup::default().generate(&resume);
        assert!(!doc.svg.contains("WORK EXPERIENCE"));
    }

    #[test]
    fn formats_month_strings() {
        assert_eq!(format_month("2021-03"), "Mar 2021");
        assert_eq!(format_month("2019-11-20"), "Nov 2019");
        assert_eq!(format_month("Summer 2018"), "Summer 2018");
    }

    #[test]
    fn date_ranges_default_to_present() {
        assert_eq!(
            date_range(Some("2020-01"), None, false).as_deref(),
            Some("Jan 2020 \u{2013} Present")
        );
        assert_eq!(
            date_range(Some("2020-01"), Some("2021-06"), true).as_deref(),
            Some("Jan 2020 \u{2013} Present")
        );
        assert_eq!(
            date_range(Some("2020-01"), Some("2021-06"), false).as_deref(),
            Some("Jan 2020 \u{2013} Jun 2021")
        );
        assert_eq!(date_range(None, None, false), None);
    }

    #[test]
    fn multi_line_descriptions_are_bulleted() {
        let job = WorkExperienceBuilder::default()
            .job_title("Engineer")
            .description("- Shipped things\n- Fixed things")
            .build()
            .unwrap();
        let resume = ResumeData {
            work_experience: vec![job],
            ..Default::default()
        };
        let doc = SvgMarkup::default().generate(&resume);
        assert_eq!(doc.svg.matches(BULLET).count(), 2);
        assert!(doc.svg.contains("Shipped things"));
    }
}
