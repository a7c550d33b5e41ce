pub const SCHEMA: &str = r#"
-- stotras table (records are created by the admin console; this tool only
-- mutates subtitle and updateddt)
CREATE TABLE IF NOT EXISTS stotras (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL DEFAULT '',
    lang TEXT NOT NULL,
    text TEXT,
    subtitle TEXT,
    createddt TEXT NOT NULL DEFAULT (datetime('now')),
    updateddt TEXT
);

CREATE INDEX IF NOT EXISTS idx_stotras_lang ON stotras(lang);
CREATE INDEX IF NOT EXISTS idx_stotras_title ON stotras(title);
"#;
