//! The profile itself: intro block and sections.

use folio_protocol::Node;

use crate::model::{Intro, OutboundLink, Page, PageError, Section};

const SKILLS: [&str; 27] = [
    "Google Cloud Platform",
    "Amazon Web Services",
    "Terraform",
    "Jenkins",
    "GitHub Actions",
    "Kubernetes",
    "Docker",
    "Ansible",
    "Argo CD",
    "Git",
    "GitHub",
    "Bash",
    "Python",
    "PowerShell",
    "Prometheus",
    "NGINX",
    "Linux",
    "Windows Server",
    "MySQL",
    "CI/CD",
    "Helm",
    "Cloud Networking",
    "Zero Trust Security",
    "GitOps",
    "Elasticsearch",
    "Kibana",
    "Fluent Bit",
];

/// The full profile page.
pub fn profile_page() -> Result<Page, PageError> {
    Page::new(intro(), sections())
}

pub fn intro() -> Intro {
    Intro {
        name: "Jai Sharma".into(),
        avatar: "/my-image.jpg".into(),
        lead: "Let's connect! Find me on".into(),
        links: vec![
            OutboundLink::new("LinkedIn", "https://www.linkedin.com/in/jaisharma2512/")
                .with_icon("/icons/linkedin.svg"),
            OutboundLink::new("GitHub", "https://github.com/Jaisharma2512/Smallboy")
                .with_icon("/icons/github.svg"),
            OutboundLink::new("Fiverr", "https://www.fiverr.com/sellers/jaisharma2512/edit")
                .with_icon("/icons/fiverr.svg"),
        ],
        tail: "or reach out for collaborations, mentorship, or tech discussions. \
               Always eager to meet fellow cloud and DevOps enthusiasts!"
            .into(),
    }
}

pub fn sections() -> Vec<Section> {
    vec![
        Section::new("summary", "Summary", summary()),
        Section::new("work-experience", "Professional Experience", experience()),
        Section::new("education", "Education", education()),
        Section::new("skills", "Technical Skills", skills()),
        Section::new("projects", "Projects", projects()),
        Section::new("certificates", "Certifications", certificates()),
    ]
}

fn summary() -> Node {
    Node::card(vec![Node::paragraph(vec![
        Node::highlight("Experienced DevOps Engineer"),
        Node::text(" with a track record of delivering "),
        Node::strong("efficient infrastructure automation"),
        Node::text(" and "),
        Node::strong("scalable CI/CD solutions"),
        Node::text(
            ". Skilled in cloud technologies and committed to driving innovation in ",
        ),
        Node::strong("secure and reliable system design"),
        Node::text("."),
    ])])
}

fn experience() -> Node {
    Node::card(vec![Node::row(vec![
        Node::image("/zscaler-logo.png", "Zscaler Logo"),
        Node::group(vec![
            Node::heading(3, "Zscaler"),
            Node::paragraph(vec![
                Node::text("DevOps Engineer"),
                Node::LineBreak,
                Node::text("Chandigarh, India"),
            ]),
            Node::list(vec![
                Node::paragraph(vec![
                    Node::strong("Led deployment"),
                    Node::text(" of Google Cloud Platform lab environments using "),
                    Node::strong("Kubernetes and Terraform"),
                    Node::text(" focused on "),
                    Node::italic("Source IP Anchoring"),
                    Node::text(" and "),
                    Node::italic("Browser Isolation"),
                    Node::text(" in "),
                    Node::strong("Zero Trust Security"),
                    Node::text(" contexts."),
                ]),
                Node::text(
                    "Enhanced deployment reliability by integrating validation scripts, \
                     successfully reducing manual errors.",
                ),
                Node::paragraph(vec![
                    Node::badge("+97% accuracy"),
                    Node::text(
                        "Automated provisioning workflows with Terraform and CI/CD pipelines, \
                         elevating deployment accuracy by 97%.",
                    ),
                ]),
                Node::text("Contributed to disaster recovery solutions using containerized architectures."),
                Node::text(
                    "Provided key support in troubleshooting and training for cloud security operations.",
                ),
            ]),
        ]),
    ])])
}

fn education() -> Node {
    Node::card(vec![Node::row(vec![
        Node::image("/graphic-era-logo.jpg", "Graphic Era Logo"),
        Node::group(vec![
            Node::heading(3, "Graphic Era Deemed to be University"),
            Node::paragraph(vec![
                Node::text("Bachelor of Technology in Computer Science Engineering"),
                Node::LineBreak,
                Node::strong("Graduated July 2023"),
            ]),
            Node::paragraph(vec![Node::badge("Recipient of IEEE Certificate of Appreciation")]),
        ]),
    ])])
}

fn skills() -> Node {
    Node::row(SKILLS.iter().map(|&skill| Node::chip(skill)).collect())
}

fn project_links(demo: &'static str, source: &'static str) -> Node {
    Node::row(vec![
        Node::link(demo, vec![Node::text("▶ Live Demo")]),
        Node::link(source, vec![Node::text("GitHub")]),
    ])
}

fn projects() -> Node {
    Node::card(vec![
        Node::group(vec![
            Node::heading(3, "Security Playground"),
            project_links(
                "https://sc.danklofan.com",
                "https://github.com/Jaisharma2512/security-playground",
            ),
            Node::list(vec![
                Node::text(
                    "Developed a containerized web server simulating security vulnerabilities \
                     to facilitate hands-on learning in Dockerized environments.",
                ),
                Node::text(
                    "Orchestrated deployment on GKE with Jenkins pipelines and configured NGINX \
                     reverse proxies for realistic sandbox testing of security issues.",
                ),
            ]),
        ]),
        Node::group(vec![
            Node::heading(3, "Small Boy"),
            project_links(
                "https://smallboy.danklofan.com",
                "https://github.com/Jaisharma2512/Smallboy/tree/k8s-resources",
            ),
            Node::list(vec![
                Node::paragraph(vec![
                    Node::badge("+80% efficiency"),
                    Node::text(
                        "Automated GKE provisioning using Terraform for a URL shortener \
                         application, boosting infrastructure deployment efficiency by 80%.",
                    ),
                ]),
                Node::text(
                    "Architected CI/CD pipelines leveraging Jenkins and GitHub Actions, using \
                     Helm charts and ArgoCD for seamless containerized deployments with zero \
                     downtime.",
                ),
            ]),
        ]),
    ])
}

fn certificate(logo: &'static str, alt: &'static str, href: &'static str, title: &'static str) -> Node {
    Node::row(vec![
        Node::image(logo, alt),
        Node::link(href, vec![Node::text(title)]),
    ])
}

fn certificates() -> Node {
    Node::card(vec![
        certificate(
            "/googlecloud.png",
            "Google Cloud Logo",
            "https://www.credly.com/badges/cc43f249-f710-4c80-b8f1-2aee8011d07f/public_url",
            "Google Associate Cloud Engineer",
        ),
        certificate(
            "/ieee-logo.png",
            "IEEE Logo",
            "https://drive.google.com/file/d/1C24ksyNmTdIhgfdjhaLbmhy0RD326OR-/view?usp=sharing",
            "IEEE Certificate of Appreciation",
        ),
    ])
}
