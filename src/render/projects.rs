//! Projects page built from `[[projects]]`.

use super::{PageMeta, Scripts, document, escape};
use crate::{blur::ContextTag, config::{ProjectConfig, SiteConfig}};
use std::{borrow::Cow, fmt::Write};

fn render_card(project: &ProjectConfig) -> String {
    let title = escape(&project.title);
    let mut html = String::from(r#"<div class="project-card">"#);

    if let Some(img) = &project.img {
        let image = format!(
            r#"<img src="{}" alt="{title}" loading="lazy" style="background-image:url('{}');background-size:cover">"#,
            escape(img),
            ContextTag::Thumbnail.blur_data_url(),
        );
        match &project.href {
            Some(href) => {
                let _ = write!(html, r#"<a href="{}" aria-label="Link to {title}">{image}</a>"#, escape(href));
            }
            None => html.push_str(&image),
        }
    }

    match &project.href {
        Some(href) => {
            let _ = write!(
                html,
                r#"<h2><a href="{href}" aria-label="Link to {title}">{title}</a></h2><p>{}</p><a class="learn-more" href="{href}">Learn more &rarr;</a>"#,
                escape(&project.description),
                href = escape(href),
            );
        }
        None => {
            let _ = write!(html, "<h2>{title}</h2><p>{}</p>", escape(&project.description));
        }
    }

    html.push_str("</div>");
    html
}

pub fn render_projects(config: &SiteConfig) -> String {
    let mut main = String::from("<header><h1>Projects</h1></header>\n<div class=\"projects\">\n");
    for project in &config.projects {
        main.push_str(&render_card(project));
        main.push('\n');
    }
    main.push_str("</div>");

    let meta = PageMeta {
        title: Cow::Borrowed("Projects"),
        path: "projects/".into(),
        ..PageMeta::default()
    };
    document(config, &meta, Scripts::default(), &main)
}
