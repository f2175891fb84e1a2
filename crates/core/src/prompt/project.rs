use super::types::{Dependency, ProjectBlock, ProjectDetails};

/// Render the high level project description that opens most prompts.
pub fn render_project_details(details: &ProjectDetails) -> String {
    let separator = if details.description.is_empty() || details.description.ends_with('\n') {
        ""
    } else {
        "\n"
    };
    let mut parts = vec![format!(
        "Here is a high level description of \"{}\":\n```\n{}{}```",
        details.name, details.description, separator
    )];

    if let Some(architecture) = details.architecture.as_deref().filter(|a| !a.is_empty()) {
        parts.push(format!(
            "Here is a short description of the project architecture:\n{architecture}"
        ));
    }

    if !details.system_dependencies.is_empty() {
        parts.push(format!(
            "Here are the technologies that should be used for this project:\n{}",
            dependency_list(&details.system_dependencies)
        ));
    }

    if !details.package_dependencies.is_empty() {
        parts.push(format!(
            "Here are the packages used by this project:\n{}",
            dependency_list(&details.package_dependencies)
        ));
    }

    parts.join("\n\n")
}

/// Render whichever project section the caller supplied. `None` yields an empty string.
pub fn render_project_block(block: &ProjectBlock) -> String {
    match block {
        ProjectBlock::None => String::new(),
        ProjectBlock::Details(details) => render_project_details(details),
        ProjectBlock::Rendered(text) => text.clone(),
    }
}

fn dependency_list(deps: &[Dependency]) -> String {
    deps.iter()
        .map(|dep| {
            if dep.description.is_empty() {
                format!("* {}", dep.name)
            } else {
                format!("* {} - {}", dep.name, dep.description)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dep(name: &str, description: &str) -> Dependency {
        Dependency {
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_minimal_details() {
        let details = ProjectDetails {
            name: "todo".to_string(),
            description: "A todo app\n".to_string(),
            ..Default::default()
        };

        assert_eq!(
            render_project_details(&details),
            "Here is a high level description of \"todo\":\n```\nA todo app\n```"
        );
    }

    #[test]
    fn test_full_details() {
        let details = ProjectDetails {
            name: "todo".to_string(),
            description: "A todo app".to_string(),
            architecture: Some("Express backend with a React frontend".to_string()),
            system_dependencies: vec![dep("Node.js", "JavaScript runtime")],
            package_dependencies: vec![dep("express", "Web framework"), dep("react", "")],
        };
        let text = render_project_details(&details);

        assert!(text.contains(
            "Here is a short description of the project architecture:\nExpress backend with a React frontend"
        ));
        assert!(text.contains(
            "Here are the technologies that should be used for this project:\n* Node.js - JavaScript runtime"
        ));
        assert!(text.contains(
            "Here are the packages used by this project:\n* express - Web framework\n* react"
        ));
    }

    #[test]
    fn test_empty_architecture_is_omitted() {
        let details = ProjectDetails {
            name: "todo".to_string(),
            architecture: Some(String::new()),
            ..Default::default()
        };
        assert!(!render_project_details(&details).contains("architecture"));
    }

    #[test]
    fn test_text_is_not_trimmed() {
        let details = ProjectDetails {
            name: "todo".to_string(),
            description: "  A todo app  ".to_string(),
            architecture: Some("  monolith  ".to_string()),
            ..Default::default()
        };
        let text = render_project_details(&details);

        assert!(text.contains("```\n  A todo app  \n```"));
        assert!(text.ends_with("architecture:\n  monolith  "));
    }

    #[test]
    fn test_rendered_block_is_verbatim() {
        let block = ProjectBlock::Rendered("  custom\nproject text  ".to_string());
        assert_eq!(render_project_block(&block), "  custom\nproject text  ");
        assert_eq!(render_project_block(&ProjectBlock::None), "");
    }
}
