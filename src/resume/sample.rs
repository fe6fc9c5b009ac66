//! A realistic sample resume, used to preview the export without filling in a form.

use super::{
    CertificationBuilder, EducationBuilder, ProjectBuilder, ResumeData, StringList,
    WorkExperienceBuilder,
};

pub fn generate() -> ResumeData {
    let work_experience = vec![
        WorkExperienceBuilder::default()
            .job_title("Senior Software Engineer")
            .company("Northwind Logistics")
            .location("Toronto, ON")
            .start_date("2021-03")
            .current(true)
            .description(
                "Led the migration of the dispatch platform to an event-driven architecture.\n\
                 Cut p99 routing latency from 900ms to 120ms by caching carrier rate tables.\n\
                 Mentored four engineers and ran the weekly design review.",
            )
            .build()
            .expect("sample work experience is complete"),
        WorkExperienceBuilder::default()
            .job_title("Software Engineer")
            .company("Contoso Health")
            .location("Calgary, AB")
            .start_date("2017-06")
            .end_date("2021-02")
            .description(
                "Built the appointment booking API used by 40 clinics.\n\
                 Introduced contract tests between the scheduling and billing services.",
            )
            .build()
            .expect("sample work experience is complete"),
    ];

    let education = vec![EducationBuilder::default()
        .degree("B.Sc.")
        .field_of_study("Computer Science")
        .institution("University of Alberta")
        .location("Edmonton, AB")
        .start_date("2013-09")
        .end_date("2017-04")
        .gpa("3.8")
        .build()
        .expect("sample education is complete")];

    let certifications = vec![CertificationBuilder::default()
        .name("Certified Kubernetes Application Developer")
        .issuer("CNCF")
        .date("2022-11")
        .build()
        .expect("sample certification is complete")];

    let projects = vec![ProjectBuilder::default()
        .name("tidewater")
        .description("An open-source tide prediction library with harmonic constituent fitting.")
        .technologies("Rust, WebAssembly")
        .link("https://github.com/example/tidewater")
        .build()
        .expect("sample project is complete")];

    ResumeData {
        first_name: Some("Jordan".to_string()),
        middle_name: None,
        last_name: Some("Rivera".to_string()),
        email: Some("jordan.rivera@example.com".to_string()),
        phone: Some("+1 555 010 2030".to_string()),
        location: Some("Toronto, ON".to_string()),
        linkedin: Some("linkedin.com/in/jordanrivera".to_string()),
        github: Some("github.com/jordanrivera".to_string()),
        website: None,
        professional_summary: Some(
            "Backend engineer with eight years of experience building reliable \
             distributed systems for logistics and healthcare. Comfortable owning \
             services from design review through on-call."
                .to_string(),
        ),
        work_experience,
        education,
        certifications,
        projects,
        skills: StringList::Items(
            ["Rust", "Go", "PostgreSQL", "Kafka", "Kubernetes", "Terraform"]
                .into_iter()
                .map(ToString::to_string)
                .collect(),
        ),
        languages: StringList::from("English, Spanish"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_round_trips_through_json() {
        let sample = generate();
        let json = serde_json::to_string_pretty(&sample).expect("can serialize sample");
        let parsed = ResumeData::from_json(&json).expect("can parse sample");
        assert_eq!(parsed, sample);
        assert_eq!(parsed.file_name(), "Jordan_Rivera.pdf");
    }
}
