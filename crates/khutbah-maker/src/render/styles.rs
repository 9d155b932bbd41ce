/// Fixed stylesheet applied to every khutbah document.
///
/// Justified body text, right-to-left styling with enlarged line-height for
/// Arabic-tagged spans, centered top-level heading, subdued secondary-heading
/// color, and quoted passages with a left accent bar.
pub const KHUTBAH_CSS: &str = "
body {
    font-family: 'Amiri', 'Segoe UI', sans-serif;
    text-align: justify;
    text-justify: inter-word;
    line-height: 1.5;
}

[lang='ar'] {
    direction: rtl;
    font-family: 'Amiri', serif;
    font-size: 1.6em;
    line-height: 1.8;
}

h1 {
    text-align: center;
    color: #2c3e50;
    margin-top: 1.5em;
    margin-bottom: 0.8em;
    font-size: 1.5em;
    font-weight: 600;
}

h2, h3, h4, h5, h6 {
    color: #34495e;
    margin-top: 1.5em;
    margin-bottom: 0.8em;
}

blockquote {
    background-color: #f9f9f9;
    border-left: 4px solid #4CAF50;
    padding: 10px 15px;
    margin: 15px 0;
    font-style: italic;
}

p {
    margin: 0.8em 0;
}

ul.toc {
    list-style: none;
}

ul.toc li.toc-2 {
    margin-left: 15px;
}

ul.toc li.toc-3 {
    margin-left: 30px;
}
";
