use crate::models::PageView;

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

/// Render the index page for one request
pub fn render_page(view: &PageView) -> String {
    let chart_2day = view
        .chart_2day_image_url
        .as_deref()
        .map(|url| chart_section("최근 2일 캔들 차트", url, "최근 2일 캔들 주가 차트"))
        .unwrap_or_default();
    let chart_weekly = view
        .chart_weekly_image_url
        .as_deref()
        .map(|url| chart_section("최근 거래일 종가 추이", url, "최근 거래일 종가 선 그래프"))
        .unwrap_or_default();

    // change_info and the chart sections are built by us; only the message is escaped.
    INDEX_TEMPLATE
        .replace("{{ stock_name }}", &escape_html(&view.stock_name))
        .replace("{{ message }}", &escape_html(&view.message))
        .replace("{{ change_info }}", &view.change_info)
        .replace("{{ chart_2day }}", &chart_2day)
        .replace("{{ chart_weekly }}", &chart_weekly)
}

fn chart_section(title: &str, url: &str, alt: &str) -> String {
    format!(
        "        <div class=\"chart\">\n            <h2>{}</h2>\n            <img src=\"{}\" alt=\"{}\">\n        </div>\n",
        title,
        escape_html(url),
        alt
    )
}

/// Escape text for use in HTML content and double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UNAVAILABLE_MESSAGE;

    #[test]
    fn test_render_unavailable_page_has_no_charts() {
        let html = render_page(&PageView::default());

        assert!(html.contains(UNAVAILABLE_MESSAGE));
        assert!(!html.contains("<img"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_render_includes_change_markup_raw() {
        let view = PageView {
            stock_name: "삼양식품".to_string(),
            message: "2024년 01월 05일 종가: 72,000원".to_string(),
            change_info: "<br><span style='color:red;'>전일대비 ▲ 2,000원 (2.86%)</span>".to_string(),
            chart_2day_image_url: None,
            chart_weekly_image_url: Some("/static/images/weekly.png".to_string()),
        };

        let html = render_page(&view);

        assert!(html.contains("2024년 01월 05일 종가: 72,000원<br><span style='color:red;'>"));
        assert!(html.contains("<img src=\"/static/images/weekly.png\""));
        assert_eq!(html.matches("<img").count(), 1);
    }

    #[test]
    fn test_render_both_charts_in_order() {
        let view = PageView {
            chart_2day_image_url: Some("/static/images/a.png".to_string()),
            chart_weekly_image_url: Some("/static/images/b.png".to_string()),
            ..PageView::default()
        };

        let html = render_page(&view);
        let first = html.find("a.png").unwrap();
        let second = html.find("b.png").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_stock_name_in_title_and_heading() {
        let view = PageView {
            stock_name: "농심 & Co".to_string(),
            ..PageView::default()
        };

        let html = render_page(&view);
        assert!(html.contains("<title>농심 &amp; Co 주가 정보</title>"));
        assert!(html.contains("<h1>농심 &amp; Co 주가 정보</h1>"));
        assert!(!html.contains("삼양식품"));
    }

    #[test]
    fn test_message_is_escaped() {
        let view = PageView {
            message: "<script>alert('x')</script>".to_string(),
            ..PageView::default()
        };

        let html = render_page(&view);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    }
}
