//! Static recommendation sets served whenever the live pipeline cannot produce
//! data. Pure and dependency-free, so it can always run.

use crate::recommendations::models::{
    CourseRecord, JobRecord, Recommendation, RecommendationKind, RecommendationSet,
};

pub fn default_set(kind: RecommendationKind) -> RecommendationSet {
    match kind {
        RecommendationKind::Job => default_jobs(),
        RecommendationKind::Course => default_courses(),
    }
}

fn job(
    title: &str,
    company: &str,
    location: &str,
    skills: &str,
    salary: &str,
    description: &str,
    url: &str,
) -> Recommendation {
    Recommendation::Job(JobRecord {
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        skills: skills.to_string(),
        salary: salary.to_string(),
        description: description.to_string(),
        url: Some(url.to_string()),
    })
}

fn course(
    title: &str,
    provider: &str,
    location: &str,
    skills: &str,
    duration: &str,
    benefits: &str,
    url: &str,
) -> Recommendation {
    Recommendation::Course(CourseRecord {
        title: title.to_string(),
        provider: provider.to_string(),
        location: location.to_string(),
        skills: skills.to_string(),
        duration: duration.to_string(),
        benefits: benefits.to_string(),
        url: Some(url.to_string()),
    })
}

pub fn default_jobs() -> RecommendationSet {
    RecommendationSet::new(vec![
        job(
            "Software Developer",
            "Tech Solutions Kenya",
            "Nairobi, Kenya",
            "JavaScript, React, Node.js, MongoDB",
            "KSh 80,000 - 120,000 per month",
            "Develop and maintain web applications for clients across various industries in Kenya.",
            "https://www.brightermonday.co.ke/jobs/software-development/nairobi",
        ),
        job(
            "Digital Marketing Specialist",
            "Savannah Media",
            "Mombasa, Kenya",
            "SEO, Social Media Marketing, Content Creation, Analytics",
            "KSh 60,000 - 90,000 per month",
            "Create and implement digital marketing strategies for businesses in the tourism sector.",
            "https://www.fuzu.com/kenya/jobs/marketing",
        ),
        job(
            "Project Manager",
            "Buildright Construction",
            "Kisumu, Kenya",
            "Project Planning, Budgeting, Team Leadership, MS Project",
            "KSh 100,000 - 150,000 per month",
            "Oversee construction projects from inception to completion, ensuring quality and timeliness.",
            "https://www.linkedin.com/jobs/project-manager-jobs-kenya",
        ),
        job(
            "Data Analyst",
            "Insight Analytics Kenya",
            "Nairobi, Kenya",
            "SQL, Python, Data Visualization, Statistical Analysis",
            "KSh 70,000 - 110,000 per month",
            "Analyze complex datasets to provide actionable insights for business decision-making.",
            "https://www.brightermonday.co.ke/jobs/data-analysis/nairobi",
        ),
        job(
            "Human Resources Officer",
            "East Africa Breweries",
            "Nairobi, Kenya",
            "Recruitment, Employee Relations, HR Policies, Training",
            "KSh 65,000 - 95,000 per month",
            "Manage recruitment processes and employee relations for a large manufacturing company.",
            "https://www.fuzu.com/kenya/jobs/human-resources",
        ),
        job(
            "Network Administrator",
            "Airtel Kenya",
            "Nairobi, Kenya",
            "Network Configuration, Cybersecurity, Cisco Systems, Troubleshooting",
            "KSh 85,000 - 130,000 per month",
            "Manage and secure enterprise network infrastructure to ensure reliable connectivity.",
            "https://www.brightermonday.co.ke/jobs/network-administrator/nairobi",
        ),
    ])
}

pub fn default_courses() -> RecommendationSet {
    RecommendationSet::new(vec![
        course(
            "Full Stack Web Development Bootcamp",
            "Moringa School",
            "Nairobi, Kenya & Online",
            "HTML, CSS, JavaScript, React, Node.js, MongoDB",
            "16 weeks",
            "Gain comprehensive skills in both frontend and backend development with hands-on projects and career support.",
            "https://moringaschool.com/courses/software-development/",
        ),
        course(
            "Digital Marketing Certification",
            "eMobilis Technology Institute",
            "Nairobi, Kenya",
            "SEO, Social Media Marketing, Google Analytics, Content Strategy",
            "8 weeks",
            "Learn practical digital marketing skills with real campaign experience and industry-recognized certification.",
            "https://emobilis.ac.ke/courses/digital-marketing/",
        ),
        course(
            "Data Science and Machine Learning",
            "Coursera - IBM Partnership",
            "Online",
            "Python, Data Analysis, Statistical Methods, Machine Learning Algorithms",
            "6 months",
            "Master data science fundamentals with IBM's industry-leading curriculum and earn a recognized certificate.",
            "https://www.coursera.org/professional-certificates/ibm-data-science",
        ),
        course(
            "Project Management Professional (PMP) Preparation",
            "Kenya Institute of Management",
            "Nairobi & Online",
            "Project Planning, Risk Management, Stakeholder Communication, PMP Exam Preparation",
            "12 weeks",
            "Prepare for the globally recognized PMP certification with expert guidance and practice exams.",
            "https://kim.ac.ke/professional-courses/project-management/",
        ),
        course(
            "UI/UX Design Fundamentals",
            "Africa Digital Media Institute",
            "Nairobi, Kenya",
            "User Research, Wireframing, Prototyping, Figma, Adobe XD",
            "10 weeks",
            "Build a professional design portfolio while learning the principles of creating user-centered digital experiences.",
            "https://admi.ac.ke/course/ui-ux-design/",
        ),
        course(
            "Cybersecurity Essentials",
            "Strathmore University",
            "Nairobi, Kenya & Online",
            "Network Security, Ethical Hacking, Risk Assessment, Cryptography",
            "12 weeks",
            "Learn to protect systems from cyber threats with practical training and earn a certificate from a reputable institution.",
            "https://www.strathmore.edu/course/cybersecurity-essentials/",
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommendations::validator::TARGET_COUNT;

    #[test]
    fn test_default_jobs_fixed_order() {
        let set = default_jobs();
        assert_eq!(set.len(), TARGET_COUNT);
        assert_eq!(set.items[0].title(), "Software Developer");
        assert_eq!(set.items[5].title(), "Network Administrator");
    }

    #[test]
    fn test_default_courses_fixed_order() {
        let set = default_courses();
        assert_eq!(set.len(), TARGET_COUNT);
        assert_eq!(set.items[0].title(), "Full Stack Web Development Bootcamp");
    }

    #[test]
    fn test_fallback_records_are_complete_and_match_kind() {
        for kind in [RecommendationKind::Job, RecommendationKind::Course] {
            let set = default_set(kind);
            assert!(set.items.iter().all(Recommendation::is_complete));
            assert!(set.items.iter().all(|r| r.kind() == kind));
        }
    }

    #[test]
    fn test_default_set_is_deterministic() {
        assert_eq!(
            default_set(RecommendationKind::Job),
            default_set(RecommendationKind::Job)
        );
    }
}
