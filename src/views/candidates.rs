use crate::dto::candidate_dto::CandidateForm;
use crate::models::candidate::{Candidate, EDUCATION_OPTIONS, EXPERIENCE_OPTIONS, STATUS_OPTIONS};
use crate::utils::html::{escape, escape_opt};

pub fn render_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!("<code>{}</code>", escape(tag)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collapsible roster entry with a "view detail" button.
pub fn candidate_entry(candidate: &Candidate) -> String {
    format!(
        r#"<div class="row candidate" data-id="{id}">
<details>
<summary>👤 {name} - {position}</summary>
<div class="cols">
<div>
<p><strong>📞 电话：</strong> {phone}</p>
<p><strong>📧 邮箱：</strong> {email}</p>
<p><strong>💼 工作经验：</strong> {experience}</p>
</div>
<div>
<p><strong>🎓 学历：</strong> {education}</p>
<p><strong>📊 状态：</strong> {status}</p>
<p><strong>🏷️ 技能标签：</strong> {tags}</p>
</div>
</div>
</details>
<form method="post" action="/candidates/{id}/view"><button type="submit">📋 详情</button></form>
</div>"#,
        id = candidate.id,
        name = escape(&candidate.name),
        position = escape_opt(candidate.position.as_deref()),
        phone = escape(&candidate.phone),
        email = escape_opt(candidate.email.as_deref()),
        experience = escape_opt(candidate.experience.as_deref()),
        education = escape_opt(candidate.education.as_deref()),
        status = escape_opt(candidate.status.as_deref()),
        tags = render_tags(&candidate.tags),
    )
}

fn candidate_entries(candidates: &[Candidate]) -> String {
    candidates.iter().map(candidate_entry).collect::<Vec<_>>().join("\n")
}

pub fn roster(candidates: &[Candidate]) -> String {
    format!(
        r#"<h1>👥 HR简历管理系统</h1>
<h2>📋 候选人列表</h2>
<div class="flash flash-info">共有 {count} 位候选人</div>
{entries}"#,
        count = candidates.len(),
        entries = candidate_entries(candidates),
    )
}

fn text_input(name: &str, label: &str, value: &str, placeholder: &str) -> String {
    format!(
        r#"<label for="{name}">{label}</label><input type="text" id="{name}" name="{name}" value="{value}" placeholder="{placeholder}">"#,
        name = name,
        label = label,
        value = escape(value),
        placeholder = escape(placeholder),
    )
}

fn select(name: &str, label: &str, options: &[&str], selected: &str) -> String {
    let opts: String = options
        .iter()
        .map(|opt| {
            let sel = if *opt == selected { " selected" } else { "" };
            format!(r#"<option value="{v}"{sel}>{v}</option>"#, v = escape(opt), sel = sel)
        })
        .collect();
    format!(
        r#"<label for="{name}">{label}</label><select id="{name}" name="{name}">{opts}</select>"#,
        name = name,
        label = label,
        opts = opts,
    )
}

/// Create form, refilled with `form` so a rejected submission keeps its input.
pub fn create_form(form: &CandidateForm) -> String {
    format!(
        r#"<h1>👥 HR简历管理系统</h1>
<h2>➕ 添加新候选人</h2>
<form method="post" action="/candidates">
<h3>基本信息</h3>
<div class="cols">
<div>
{name}
{phone}
{position}
</div>
<div>
{email}
{experience}
{education}
</div>
</div>
{status}
{tags}
<p><button type="submit">💾 保存候选人</button></p>
</form>"#,
        name = text_input("name", "姓名 *", &form.name, "请输入姓名"),
        phone = text_input("phone", "手机号 *", &form.phone, "13800138000"),
        position = text_input("position", "当前职位", &form.position, "如：Java工程师"),
        email = text_input("email", "邮箱", &form.email, "example@email.com"),
        experience = select("experience", "工作年限", &EXPERIENCE_OPTIONS, &form.experience),
        education = select("education", "学历", &EDUCATION_OPTIONS, &form.education),
        status = select("status", "状态", &STATUS_OPTIONS, &form.status),
        tags = text_input("tags", "技能标签（用逗号分隔）", &form.tags, "如：Java,Python,MySQL"),
    )
}

/// Search box plus, once a search was submitted, its results.
pub fn search(keyword: Option<&str>, results: Option<&[Candidate]>) -> String {
    let outcome = match results {
        None => String::new(),
        Some([]) => r#"<div class="flash flash-warning">😕 没有找到匹配的候选人</div>"#.to_string(),
        Some(found) => format!(
            r#"<div class="flash flash-success">找到 {} 位候选人</div>
{}"#,
            found.len(),
            candidate_entries(found)
        ),
    };

    format!(
        r#"<h1>👥 HR简历管理系统</h1>
<h2>🔍 搜索候选人</h2>
<form method="get" action="/search">
<label for="keyword">输入姓名搜索</label>
<input type="text" id="keyword" name="keyword" value="{keyword}" placeholder="请输入候选人姓名、职位或技能标签">
<p><button type="submit">搜索</button></p>
</form>
{outcome}"#,
        keyword = escape_opt(keyword),
        outcome = outcome,
    )
}
