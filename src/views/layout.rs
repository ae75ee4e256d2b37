use serde::Deserialize;

use crate::middleware::session::{Flash, FlashKind};
use crate::utils::html::escape;

pub const APP_TITLE: &str = "HR简历管理系统";

/// Sidebar modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Menu {
    #[default]
    Roster,
    Create,
    Search,
}

impl Menu {
    const ALL: [Menu; 3] = [Menu::Roster, Menu::Create, Menu::Search];

    fn label(self) -> &'static str {
        match self {
            Menu::Roster => "候选人列表",
            Menu::Create => "添加候选人",
            Menu::Search => "搜索候选人",
        }
    }

    fn href(self) -> &'static str {
        match self {
            Menu::Roster => "/?menu=roster",
            Menu::Create => "/?menu=create",
            Menu::Search => "/search",
        }
    }
}

const STYLE: &str = r#"
    body { font-family: -apple-system, 'Segoe UI', 'PingFang SC', 'Microsoft YaHei', sans-serif; margin: 0; display: flex; color: #262730; }
    nav { width: 220px; min-height: 100vh; background: #f0f2f6; padding: 20px; box-sizing: border-box; }
    nav a { display: block; padding: 8px 10px; border-radius: 5px; color: #262730; text-decoration: none; }
    nav a.active { background: #ff4b4b; color: #fff; }
    nav .tip { margin-top: 30px; font-size: 13px; color: #555; border-top: 1px solid #ddd; padding-top: 12px; }
    main { flex: 1; padding: 30px 40px; max-width: 1100px; }
    .flash { padding: 10px 14px; border-radius: 5px; margin-bottom: 16px; }
    .flash-success { background: #dff5e3; } .flash-info { background: #e3eefc; }
    .flash-warning { background: #fff6d6; } .flash-error { background: #fde2e2; }
    .row { display: flex; gap: 12px; align-items: flex-start; margin-bottom: 8px; }
    .row details { flex: 5; border: 1px solid #e6e6e6; border-radius: 5px; padding: 8px 12px; }
    .row form { flex: 1; }
    .cols { display: flex; gap: 24px; } .cols > div { flex: 1; }
    .metrics { display: flex; gap: 24px; } .metric { flex: 1; }
    .metric .label { font-size: 13px; color: #666; } .metric .value { font-size: 26px; }
    .comment { background-color: #f0f2f6; padding: 10px; border-radius: 5px; margin-bottom: 10px; white-space: pre-wrap; }
    code { background: #f0f2f6; padding: 1px 5px; border-radius: 3px; margin-right: 6px; }
    label { display: block; margin: 8px 0 4px; }
    input[type=text], select, textarea { width: 100%; padding: 6px; box-sizing: border-box; }
    hr { border: none; border-top: 1px solid #e6e6e6; margin: 20px 0; }
"#;

pub fn render_flash(flash: Option<&Flash>) -> String {
    let Some(flash) = flash else {
        return String::new();
    };
    let class = match flash.kind {
        FlashKind::Success => "flash-success",
        FlashKind::Info => "flash-info",
        FlashKind::Warning => "flash-warning",
        FlashKind::Error => "flash-error",
    };
    format!(
        r#"<div class="flash {}" role="status">{}</div>"#,
        class,
        escape(&flash.message)
    )
}

fn sidebar(active: Menu) -> String {
    let links: String = Menu::ALL
        .iter()
        .map(|menu| {
            let class = if *menu == active { r#" class="active""# } else { "" };
            format!(r#"<a href="{}"{}>{}</a>"#, menu.href(), class, menu.label())
        })
        .collect();
    format!(
        r#"<nav><h3>选择功能</h3>{}<div class="tip">💡 提示：这是一个简单的HR简历管理系统</div></nav>"#,
        links
    )
}

/// Full HTML document. The sidebar is only shown on the listing screens;
/// pass `None` for the detail screen.
pub fn page(active: Option<Menu>, flash: Option<&Flash>, content: &str) -> String {
    let nav = active.map(sidebar).unwrap_or_default();
    format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
{nav}
<main>
{flash}
{content}
</main>
</body>
</html>"#,
        title = APP_TITLE,
        style = STYLE,
        nav = nav,
        flash = render_flash(flash),
        content = content,
    )
}
