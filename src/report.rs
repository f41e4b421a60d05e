use crate::index_oglasi::Listing;
use crate::ScrapeError;
use handlebars::Handlebars;
use serde::Serialize;
use std::fs;
use std::path::Path;

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Web Report</title>
    <style>
        table {
            font-family: Arial, sans-serif;
            border-collapse: collapse;
            width: 100%;
        }

        th {
            background-color: #f2f2f2;
        }

        th, td {
            border: 1px solid #dddddd;
            text-align: left;
            padding: 8px;
        }
    </style>
</head>
<body>
    <h1>Web Report</h1>
    <table>
        <tr>
            <th>Title</th>
            <th>Price</th>
            <th>Price EUR</th>
            <th>Price KN</th>
            <th>Tags</th>
        </tr>
{{#each rows}}
        <tr>
            <td width='70%'>{{title}}</td>
            <td>{{price_display}}</td>
            <td>{{price_eur}}</td>
            <td>{{price_kn}}</td>
            <td>
                <ul>
{{#each tags}}
                    <li>{{key}}: {{value}}</li>
{{/each}}
                </ul>
            </td>
        </tr>
{{/each}}
    </table>
</body>
</html>
"#;

#[derive(Serialize)]
struct ReportContext<'a> {
    rows: Vec<Row<'a>>,
}

#[derive(Serialize)]
struct Row<'a> {
    title: &'a str,
    price_display: &'a str,
    price_eur: u64,
    price_kn: u64,
    tags: Vec<Tag<'a>>,
}

#[derive(Serialize)]
struct Tag<'a> {
    key: &'a str,
    value: &'a str,
}

/// Renders the full dataset into the report HTML. Output depends only on the
/// listings, so identical input gives identical bytes.
pub fn render(listings: &[Listing]) -> Result<String, ScrapeError> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);

    let rows = listings
        .iter()
        .map(|l| Row {
            title: &l.title,
            price_display: &l.price_display,
            price_eur: l.price_eur,
            price_kn: l.price_kn,
            tags: l
                .tags
                .iter()
                .map(|(key, value)| Tag { key, value })
                .collect(),
        })
        .collect();

    Ok(handlebars.render_template(TEMPLATE, &ReportContext { rows })?)
}

pub fn write(path: &Path, html: &str) -> Result<(), ScrapeError> {
    fs::write(path, html)?;
    Ok(())
}
