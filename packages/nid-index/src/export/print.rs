//! Printable server-copy rendering.
//!
//! Turns one record into a self-contained bilingual HTML document, the
//! "server verification copy" layout. Pure templating - values are
//! escaped, the blood-group block disappears entirely when the record has
//! none.

use chrono::Local;

use crate::types::IdentityRecord;

fn esc(value: &str) -> String {
    html_escape::encode_text(value).into_owned()
}

fn esc_opt(value: &Option<String>) -> String {
    esc(value.as_deref().unwrap_or(""))
}

/// Render the printable server copy for one record.
pub fn render_server_copy(record: &IdentityRecord) -> String {
    let blood_block = match record.blood_group.as_deref() {
        Some(group) if !group.trim().is_empty() => format!(
            r#"        <tr>
          <td class="label">রক্তের গ্রুপ<br>Blood Group</td>
          <td><div class="value-en highlight">{}</div></td>
        </tr>
"#,
            esc(group)
        ),
        _ => String::new(),
    };

    format!(
        r#"<html>
  <head>
    <title>NID Server Copy - {name_en}</title>
    <style>
      body {{ font-family: 'Hind Siliguri', 'Inter', sans-serif; padding: 40px; color: #333; }}
      .header {{ text-align: center; border-bottom: 2px solid #000; padding-bottom: 20px; margin-bottom: 30px; }}
      .header h1 {{ font-size: 24px; margin: 0; text-transform: uppercase; }}
      .header p {{ font-size: 14px; margin: 5px 0 0; font-weight: bold; }}
      .data-table {{ width: 100%; border-collapse: collapse; }}
      .data-table td {{ padding: 12px 5px; border-bottom: 1px solid #eee; vertical-align: top; }}
      .label {{ font-weight: bold; width: 150px; font-size: 13px; color: #666; }}
      .value-bn {{ font-size: 18px; font-weight: bold; margin-bottom: 2px; }}
      .value-en {{ font-size: 14px; color: #333; text-transform: uppercase; }}
      .highlight {{ font-size: 18px; font-weight: bold; color: red; }}
      .nid {{ font-size: 22px; color: #000; }}
      .footer {{ margin-top: 50px; font-size: 11px; text-align: center; color: #999; border-top: 1px solid #eee; padding-top: 10px; }}
    </style>
  </head>
  <body>
    <div class="header">
      <h1>Government of the People's Republic of Bangladesh</h1>
      <p>National ID Service - Server Verification Copy</p>
    </div>
    <table class="data-table">
      <tr>
        <td class="label">নাম (বাংলা)<br>Name (English)</td>
        <td>
          <div class="value-bn">{name_bn}</div>
          <div class="value-en">{name_en}</div>
        </td>
      </tr>
      <tr>
        <td class="label">পিতা<br>Father</td>
        <td>
          <div class="value-bn">{father_bn}</div>
          <div class="value-en">{father_en}</div>
        </td>
      </tr>
      <tr>
        <td class="label">মাতা<br>Mother</td>
        <td>
          <div class="value-bn">{mother_bn}</div>
          <div class="value-en">{mother_en}</div>
        </td>
      </tr>
      <tr>
        <td class="label">জাতীয় পরিচয়পত্র নং<br>NID No</td>
        <td><div class="value-bn nid">{nid}</div></td>
      </tr>
      <tr>
        <td class="label">জন্ম তারিখ<br>Date of Birth</td>
        <td><div class="value-en highlight" style="color: #333;">{dob}</div></td>
      </tr>
      <tr>
        <td class="label">ঠিকানা<br>Address</td>
        <td>
          <div class="value-bn" style="font-size: 14px;">{address_bn}</div>
          <div class="value-en" style="font-size: 12px;">{address_en}</div>
        </td>
      </tr>
{blood_block}    </table>
    <div class="footer">
      Generated on: {generated} | Source: {source} | Ref: {id}
    </div>
  </body>
</html>
"#,
        name_en = esc(&record.full_name_en),
        name_bn = esc(&record.full_name_bn),
        father_bn = esc_opt(&record.father_name_bn),
        father_en = esc_opt(&record.father_name_en),
        mother_bn = esc_opt(&record.mother_name_bn),
        mother_en = esc_opt(&record.mother_name_en),
        nid = esc(&record.nid_number),
        dob = esc(&record.date_of_birth),
        address_bn = esc_opt(&record.address_bn),
        address_en = esc_opt(&record.address_en),
        blood_block = blood_block,
        generated = Local::now().format("%Y-%m-%d %H:%M:%S"),
        source = esc(&record.source_file),
        id = esc(&record.id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SourceKind;

    fn sample() -> IdentityRecord {
        IdentityRecord::new("1990123456789", "1990-01-01")
            .with_name("Rahim Uddin", "রহিম উদ্দিন")
            .with_father("Karim Uddin", "করিম উদ্দিন")
            .with_source("scan_01.pdf", SourceKind::Local)
    }

    #[test]
    fn test_renders_bilingual_fields() {
        let html = render_server_copy(&sample());
        assert!(html.contains("রহিম উদ্দিন"));
        assert!(html.contains("Rahim Uddin"));
        assert!(html.contains("1990123456789"));
        assert!(html.contains("scan_01.pdf"));
    }

    #[test]
    fn test_blood_group_block_omitted_when_absent() {
        let html = render_server_copy(&sample());
        assert!(!html.contains("Blood Group"));

        let with_group = sample().with_blood_group("AB-");
        let html = render_server_copy(&with_group);
        assert!(html.contains("Blood Group"));
        assert!(html.contains("AB-"));
    }

    #[test]
    fn test_blank_blood_group_treated_as_absent() {
        let html = render_server_copy(&sample().with_blood_group("   "));
        assert!(!html.contains("Blood Group"));
    }

    #[test]
    fn test_values_are_escaped() {
        let hostile = sample().with_name("<script>alert(1)</script>", "নাম");
        let html = render_server_copy(&hostile);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
