use crate::models::{candidate::Candidate, comment::Comment, file::FileMeta};
use crate::utils::html::{escape, escape_opt};
use crate::utils::upload::ALLOWED_EXTENSIONS;
use crate::views::candidates::render_tags;

fn metric(label: &str, value: Option<&str>) -> String {
    format!(
        r#"<div class="metric"><div class="label">{}</div><div class="value">{}</div></div>"#,
        label,
        escape_opt(value)
    )
}

fn file_list(candidate_id: i64, files: &[FileMeta]) -> String {
    if files.is_empty() {
        return r#"<div class="flash flash-info">暂无上传文件</div>"#.to_string();
    }
    let items: String = files
        .iter()
        .enumerate()
        .map(|(idx, file)| {
            format!(
                r#"<li>📄 {n}. <a href="/api/candidates/{cid}/files/{fid}">{name}</a></li>"#,
                n = idx + 1,
                cid = candidate_id,
                fid = file.id,
                name = escape(&file.name),
            )
        })
        .collect();
    format!(
        r#"<p><strong>已上传的文件：</strong></p><ul class="files">{}</ul>"#,
        items
    )
}

fn comment_list(comments: &[Comment]) -> String {
    if comments.is_empty() {
        return r#"<div class="flash flash-info">暂无备注</div>"#.to_string();
    }
    let items: String = comments
        .iter()
        .map(|c| {
            format!(
                r#"<div class="comment"><small>🕒 {}</small><br>{}</div>"#,
                escape_opt(c.time.as_deref()),
                escape(&c.text)
            )
        })
        .collect();
    format!(r#"<p><strong>历史备注：</strong></p>{}"#, items)
}

pub fn detail(candidate: &Candidate, files: &[FileMeta], comments: &[Comment]) -> String {
    let accept = ALLOWED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(",");

    format!(
        r#"<form method="post" action="/back"><button type="submit">⬅️ 返回列表</button></form>
<h1>👤 {name} 的详细信息</h1>
<div class="metrics">
{experience}
{education}
{status}
</div>
<hr>
<h2>📋 基本信息</h2>
<div class="cols">
<div>
<p><strong>📞 电话：</strong> {phone}</p>
<p><strong>💼 当前职位：</strong> {position}</p>
</div>
<div>
<p><strong>📧 邮箱：</strong> {email}</p>
<p><strong>🏷️ 技能标签：</strong> {tags}</p>
</div>
</div>
<hr>
<h2>📤 简历文件</h2>
<form method="post" action="/candidates/{id}/files" enctype="multipart/form-data">
<label for="file">上传简历文件（PDF/Word/图片）</label>
<input type="file" id="file" name="file" accept="{accept}">
<p><button type="submit">💾 保存文件</button></p>
</form>
{files}
<hr>
<h2>💬 备注与评论</h2>
<form method="post" action="/candidates/{id}/comments">
<label for="text">添加备注</label>
<textarea id="text" name="text" rows="4" placeholder="输入对该候选人的评价、面试反馈等..."></textarea>
<p><button type="submit">💬 添加备注</button></p>
</form>
{comments}"#,
        id = candidate.id,
        name = escape(&candidate.name),
        experience = metric("工作年限", candidate.experience.as_deref()),
        education = metric("学历", candidate.education.as_deref()),
        status = metric("状态", candidate.status.as_deref()),
        phone = escape(&candidate.phone),
        position = escape_opt(candidate.position.as_deref()),
        email = escape_opt(candidate.email.as_deref()),
        tags = render_tags(&candidate.tags),
        accept = accept,
        files = file_list(candidate.id, files),
        comments = comment_list(comments),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> Candidate {
        Candidate {
            id: 1,
            name: "张三".into(),
            phone: "13800138000".into(),
            email: None,
            position: Some("Java工程师".into()),
            experience: Some("5年".into()),
            education: Some("本科".into()),
            status: Some("待沟通".into()),
            tags: vec!["Java".into()],
            created_at: None,
        }
    }

    #[test]
    fn files_are_numbered_from_one() {
        let files = vec![
            FileMeta {
                id: 9,
                name: "new.pdf".into(),
                upload_time: None,
            },
            FileMeta {
                id: 4,
                name: "old.docx".into(),
                upload_time: None,
            },
        ];
        let html = detail(&candidate(), &files, &[]);
        assert!(html.contains("📄 1. <a href=\"/api/candidates/1/files/9\">new.pdf</a>"));
        assert!(html.contains("📄 2. <a href=\"/api/candidates/1/files/4\">old.docx</a>"));
        assert!(html.contains("暂无备注"));
    }

    #[test]
    fn comments_show_time_and_escaped_text() {
        let comments = vec![Comment {
            id: 1,
            candidate_id: 1,
            text: "<i>好</i>".into(),
            time: Some("2024-05-01 10:00:00".into()),
        }];
        let html = detail(&candidate(), &[], &comments);
        assert!(html.contains("🕒 2024-05-01 10:00:00"));
        assert!(html.contains("&lt;i&gt;好&lt;/i&gt;"));
        assert!(html.contains("暂无上传文件"));
    }

    #[test]
    fn upload_input_lists_allowed_types() {
        let html = detail(&candidate(), &[], &[]);
        assert!(html.contains(r#"accept=".pdf,.doc,.docx,.jpg,.png""#));
        assert!(html.contains("👤 张三 的详细信息"));
    }
}
