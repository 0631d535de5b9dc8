//! # Template Rewrite Rules
//!
//! File: cli/src/commands/start/rules.rs
//!
//! ## Overview
//!
//! The template bootstrap turns a plain HTML/CSS template into generator
//! sources by rewriting two entry points. Each transformation is an explicit
//! `RewriteRule`: a name, a compiled pattern and a replacement. Rules are kept
//! in ordered lists and applied in sequence by `apply_rules`.
//!
//! ## Rule Order
//!
//! Stylesheet entry point (`styles/index.scss`):
//! 1. `import-to-use`: `@import url("reset.css");` becomes `@use "reset";`
//! 2. `front-matter`: prepend `---\n---\n\n`
//!
//! HTML entry point (`index.html`), with `{P}` the path variable, `{V}` the
//! version variable and `{B}` the bundle subdirectory:
//! 1. `front-matter`: prepend front matter and the include directive
//! 2. `strip-base-href`: drop lines holding a commented-out `<base href>`
//! 3. `styles-href`: `href="styles/X"` becomes `href="{P}styles/X?v={V}"`
//! 4. `assets-href`: `href="assets/X"` becomes `href="{P}assets/X"`
//! 5. `og-image`: relative `og:image` content gets `{P}`
//! 6. `scripts-src`: `src="scripts/X"` becomes `src="{P}{B}/X?v={V}"`
//! 7. `generic-src`: every other relative `src` gets `{P}`
//! 8. `collapse-prefix`: `{P}{P}...` becomes `{P}`
//! 9. `script-defer`: `type="module"` / `defer` collapse to one trailing `defer`
//!
//! Rule 7 also matches attributes rewritten by rule 6 and doubles their
//! prefix; rule 8 must therefore run after it.
//!
use crate::core::config::TemplateConfig;
use crate::core::error::Result;
use anyhow::Context;
use regex::{Captures, NoExpand, Regex};
use tracing::debug;

/// Computed replacement: receives the captures of one match.
type ReplaceFn = Box<dyn Fn(&Captures) -> String + Send + Sync>;

/// How a rule produces the replacement text for each match.
pub enum Replacement {
    /// Inserted verbatim (`$` is not special).
    Literal(String),
    /// `$1` / `${name}` are expanded from the captures.
    Template(&'static str),
    /// Built by a function of the captures.
    Computed(ReplaceFn),
}

/// One named pattern-to-replacement transformation.
pub struct RewriteRule {
    pub name: &'static str,
    pattern: Regex,
    replacement: Replacement,
    /// Maximum number of replacements; 0 means all.
    limit: usize,
}

impl RewriteRule {
    fn new(name: &'static str, pattern: &str, replacement: Replacement) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .with_context(|| format!("Invalid pattern for rewrite rule '{}'", name))?;
        Ok(Self {
            name,
            pattern,
            replacement,
            limit: 0,
        })
    }

    /// Rule inserting `text` once at the very start of the input.
    fn prepend(name: &'static str, text: String) -> Result<Self> {
        let mut rule = Self::new(name, r"\A", Replacement::Literal(text))?;
        rule.limit = 1;
        Ok(rule)
    }

    /// Returns true if the rule would change anything in `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Applies the rule to `text`.
    pub fn apply(&self, text: &str) -> String {
        let rewritten = match &self.replacement {
            Replacement::Literal(literal) => {
                self.pattern
                    .replacen(text, self.limit, NoExpand(literal.as_str()))
            }
            Replacement::Template(template) => self.pattern.replacen(text, self.limit, *template),
            Replacement::Computed(f) => {
                self.pattern
                    .replacen(text, self.limit, |caps: &Captures| f(caps))
            }
        };
        rewritten.into_owned()
    }
}

/// Applies `rules` in order, each to the output of the previous one.
pub fn apply_rules(rules: &[RewriteRule], text: &str) -> String {
    let mut current = text.to_string();
    for rule in rules {
        if !rule.matches(&current) {
            debug!("Rewrite rule '{}' matched nothing", rule.name);
            continue;
        }
        current = rule.apply(&current);
        debug!("Applied rewrite rule '{}'", rule.name);
    }
    current
}

/// Generator variables spliced into rewritten references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOptions {
    pub path_variable: String,
    pub version_variable: String,
    pub include_directive: String,
    pub bundle_subdir: String,
    pub versioned_assets: bool,
}

impl RewriteOptions {
    pub fn from_config(template: &TemplateConfig) -> Self {
        Self {
            path_variable: template.path_variable.clone(),
            version_variable: template.version_variable.clone(),
            include_directive: template.include_directive.clone(),
            bundle_subdir: template.bundle_subdir.trim_matches('/').to_string(),
            versioned_assets: template.versioned_assets,
        }
    }

    /// Adds the cache-busting query to `url`, before any `#fragment`.
    /// Uses `&v=` when the URL already has a query string.
    fn versioned(&self, url: &str) -> String {
        if !self.versioned_assets {
            return url.to_string();
        }
        let (location, fragment) = url.split_at(url.find('#').unwrap_or(url.len()));
        let separator = if location.contains('?') { '&' } else { '?' };
        format!(
            "{}{}v={}{}",
            location, separator, self.version_variable, fragment
        )
    }
}

/// Returns true for references the path variable must not be applied to.
fn is_absolute_reference(url: &str) -> bool {
    if url.is_empty() || url.starts_with('/') || url.starts_with('#') {
        return true;
    }
    // URI scheme: ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"
    match url.split_once(':') {
        Some((scheme, _)) => {
            let mut chars = scheme.chars();
            chars.next().is_some_and(|c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

/// Rules for the stylesheet entry point, in application order.
pub fn stylesheet_rules() -> Result<Vec<RewriteRule>> {
    Ok(vec![
        RewriteRule::new(
            "import-to-use",
            r#"@import\s+url\(\s*["']?([^"')\s]+?)\.css["']?\s*\)\s*;"#,
            Replacement::Template(r#"@use "${1}";"#),
        )?,
        RewriteRule::prepend("front-matter", "---\n---\n\n".to_string())?,
    ])
}

/// Rules for the HTML entry point, in application order.
pub fn html_rules(options: &RewriteOptions) -> Result<Vec<RewriteRule>> {
    let front_matter = format!("---\n---\n{}\n\n", options.include_directive);

    let styles = options.clone();
    let assets = options.clone();
    let og = options.clone();
    let scripts = options.clone();
    let generic = options.clone();

    let module_attr = Regex::new(r#"\s+type\s*=\s*["']module["']"#)
        .context("Invalid pattern for script type attribute")?;
    let defer_attr = Regex::new(r#"\s+defer\b(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]*))?"#)
        .context("Invalid pattern for script defer attribute")?;

    Ok(vec![
        RewriteRule::prepend("front-matter", front_matter)?,
        RewriteRule::new(
            "strip-base-href",
            r"(?m)^[^\n]*<!--[^\n]*<base\s+href[^\n]*\n?",
            Replacement::Literal(String::new()),
        )?,
        RewriteRule::new(
            "styles-href",
            r#"(\s)href="styles/([^"]*)""#,
            Replacement::Computed(Box::new(move |caps: &Captures| {
                format!(
                    r#"{}href="{}styles/{}""#,
                    &caps[1],
                    styles.path_variable,
                    styles.versioned(&caps[2])
                )
            })),
        )?,
        RewriteRule::new(
            "assets-href",
            r#"(\s)href="assets/([^"]*)""#,
            Replacement::Computed(Box::new(move |caps: &Captures| {
                format!(
                    r#"{}href="{}assets/{}""#,
                    &caps[1], assets.path_variable, &caps[2]
                )
            })),
        )?,
        RewriteRule::new(
            "og-image",
            r#"(<meta\s[^>]*property="og:image"[^>]*\scontent=")([^"]*)""#,
            Replacement::Computed(Box::new(move |caps: &Captures| {
                if is_absolute_reference(&caps[2]) {
                    caps[0].to_string()
                } else {
                    format!(r#"{}{}{}""#, &caps[1], og.path_variable, &caps[2])
                }
            })),
        )?,
        RewriteRule::new(
            "scripts-src",
            r#"(\s)src="scripts/([^"]*)""#,
            Replacement::Computed(Box::new(move |caps: &Captures| {
                format!(
                    r#"{}src="{}{}/{}""#,
                    &caps[1],
                    scripts.path_variable,
                    scripts.bundle_subdir,
                    scripts.versioned(&caps[2])
                )
            })),
        )?,
        RewriteRule::new(
            "generic-src",
            r#"(\s)src="([^"]*)""#,
            Replacement::Computed(Box::new(move |caps: &Captures| {
                if is_absolute_reference(&caps[2]) {
                    caps[0].to_string()
                } else {
                    format!(r#"{}src="{}{}""#, &caps[1], generic.path_variable, &caps[2])
                }
            })),
        )?,
        RewriteRule::new(
            "collapse-prefix",
            &format!("(?:{}){{2,}}", regex::escape(&options.path_variable)),
            Replacement::Literal(options.path_variable.clone()),
        )?,
        RewriteRule::new(
            "script-defer",
            r"<script\b([^>]*)>",
            Replacement::Computed(Box::new(move |caps: &Captures| {
                let attrs = &caps[1];
                if !module_attr.is_match(attrs) && !defer_attr.is_match(attrs) {
                    return caps[0].to_string();
                }
                let stripped = module_attr.replace_all(attrs, "");
                let stripped = defer_attr.replace_all(&stripped, "");
                format!("<script{} defer>", stripped.trim_end())
            })),
        )?,
    ])
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> RewriteOptions {
        RewriteOptions::from_config(&TemplateConfig::default())
    }

    fn rule<'a>(rules: &'a [RewriteRule], name: &str) -> &'a RewriteRule {
        rules
            .iter()
            .find(|r| r.name == name)
            .unwrap_or_else(|| panic!("rule {} missing", name))
    }

    #[test]
    fn test_stylesheet_fixture() -> Result<()> {
        let input = "@import url(\"reset.css\");\nbody { margin: 0; }\n";
        let output = apply_rules(&stylesheet_rules()?, input);
        assert_eq!(output, "---\n---\n\n@use \"reset\";\nbody { margin: 0; }\n");
        Ok(())
    }

    #[test]
    fn test_import_quote_variants() -> Result<()> {
        let rules = stylesheet_rules()?;
        let import = rule(&rules, "import-to-use");
        assert_eq!(import.apply("@import url('a.css');"), "@use \"a\";");
        assert_eq!(import.apply("@import url(b.css);"), "@use \"b\";");
        assert_eq!(import.apply("@import  url( \"c.css\" ) ;"), "@use \"c\";");
        assert_eq!(import.apply("@import url(\"parts/d.css\");"), "@use \"parts/d\";");
        // Non-.css imports are left alone.
        assert_eq!(
            import.apply("@import url(\"https://fonts.example/css2?family=X\");"),
            "@import url(\"https://fonts.example/css2?family=X\");"
        );
        Ok(())
    }

    #[test]
    fn test_front_matter_prepended_once() -> Result<()> {
        let rules = stylesheet_rules()?;
        let fm = rule(&rules, "front-matter");
        assert_eq!(fm.apply("a\nb\n"), "---\n---\n\na\nb\n");
        assert_eq!(fm.apply(""), "---\n---\n\n");
        Ok(())
    }

    #[test]
    fn test_html_fixture() -> Result<()> {
        let input = concat!(
            "<html>\n",
            "<head>\n",
            "  <!-- <base href=\"/\"> -->\n",
            "  <link rel=\"stylesheet\" href=\"styles/main.css\">\n",
            "</head>\n",
            "<body>\n",
            "  <img src=\"assets/logo.png\">\n",
            "  <script src=\"scripts/app.js\" type=\"module\"></script>\n",
            "</body>\n",
            "</html>\n",
        );
        let output = apply_rules(&html_rules(&options())?, input);

        assert!(output.starts_with("---\n---\n{% include path.html %}\n\n<html>\n"));
        assert!(!output.contains("<base"));
        assert!(output.contains(
            r#"<link rel="stylesheet" href="{{ path }}styles/main.css?v={{ site.version }}">"#
        ));
        assert!(output.contains(r#"<img src="{{ path }}assets/logo.png">"#));
        assert!(output.contains(
            r#"<script src="{{ path }}bundle/app.js?v={{ site.version }}" defer></script>"#
        ));
        assert!(!output.contains("type=\"module\""));
        assert!(!output.contains("{{ path }}{{ path }}"));
        Ok(())
    }

    #[test]
    fn test_strip_base_href_keeps_live_base() -> Result<()> {
        let rules = html_rules(&options())?;
        let strip = rule(&rules, "strip-base-href");
        let input = "a\n<!--<base href=\"/x/\">-->\n<base href=\"/live/\">\nb";
        assert_eq!(strip.apply(input), "a\n<base href=\"/live/\">\nb");
        Ok(())
    }

    #[test]
    fn test_styles_href_with_existing_query() -> Result<()> {
        let rules = html_rules(&options())?;
        let styles = rule(&rules, "styles-href");
        assert_eq!(
            styles.apply(r#"<link href="styles/a.css?x=1">"#),
            r#"<link href="{{ path }}styles/a.css?x=1&v={{ site.version }}">"#
        );
        Ok(())
    }

    #[test]
    fn test_version_goes_before_fragment() -> Result<()> {
        let rules = html_rules(&options())?;
        let styles = rule(&rules, "styles-href");
        assert_eq!(
            styles.apply(r#"<link href="styles/a.css#x">"#),
            r#"<link href="{{ path }}styles/a.css?v={{ site.version }}#x">"#
        );
        assert_eq!(
            styles.apply(r#"<link href="styles/a.css?x=1#top">"#),
            r#"<link href="{{ path }}styles/a.css?x=1&v={{ site.version }}#top">"#
        );
        let scripts = rule(&rules, "scripts-src");
        assert_eq!(
            scripts.apply(r#"<script src="scripts/app.js#main"></script>"#),
            r#"<script src="{{ path }}bundle/app.js?v={{ site.version }}#main"></script>"#
        );
        Ok(())
    }

    #[test]
    fn test_unversioned_variant() -> Result<()> {
        let mut opts = options();
        opts.versioned_assets = false;
        let output = apply_rules(
            &html_rules(&opts)?,
            "<link href=\"styles/a.css\"><script src=\"scripts/app.js\"></script>",
        );
        assert!(output.contains(r#"href="{{ path }}styles/a.css""#));
        assert!(output.contains(r#"src="{{ path }}bundle/app.js""#));
        assert!(!output.contains("?v="));
        Ok(())
    }

    #[test]
    fn test_og_image_prefix() -> Result<()> {
        let rules = html_rules(&options())?;
        let og = rule(&rules, "og-image");
        assert_eq!(
            og.apply(r#"<meta property="og:image" content="assets/card.png">"#),
            r#"<meta property="og:image" content="{{ path }}assets/card.png">"#
        );
        let absolute = r#"<meta property="og:image" content="https://cdn.example/card.png">"#;
        assert_eq!(og.apply(absolute), absolute);
        Ok(())
    }

    #[test]
    fn test_generic_src_skips_absolute() -> Result<()> {
        let rules = html_rules(&options())?;
        let generic = rule(&rules, "generic-src");
        let input = r#"<img src="https://x/y.png"><img src="//cdn/z.png"><img src="data:image/png;base64,AA"><img src="pic.png">"#;
        let output = generic.apply(input);
        assert!(output.contains(r#"src="https://x/y.png""#));
        assert!(output.contains(r#"src="//cdn/z.png""#));
        assert!(output.contains(r#"src="data:image/png;base64,AA""#));
        assert!(output.contains(r#"src="{{ path }}pic.png""#));
        Ok(())
    }

    #[test]
    fn test_data_src_not_treated_as_src() -> Result<()> {
        let rules = html_rules(&options())?;
        let generic = rule(&rules, "generic-src");
        let input = r#"<img data-src="lazy.png">"#;
        assert_eq!(generic.apply(input), input);
        Ok(())
    }

    #[test]
    fn test_collapse_double_prefix() -> Result<()> {
        let rules = html_rules(&options())?;
        let collapse = rule(&rules, "collapse-prefix");
        assert_eq!(
            collapse.apply(r#"<img src="{{ path }}{{ path }}{{ path }}a.png">"#),
            r#"<img src="{{ path }}a.png">"#
        );
        // Single prefix is left untouched.
        assert!(!collapse.matches(r#"<img src="{{ path }}a.png">"#));
        Ok(())
    }

    #[test]
    fn test_already_prefixed_src_ends_with_single_prefix() -> Result<()> {
        let input = r#"<img src="{{ path }}img/a.png">"#;
        let output = apply_rules(&html_rules(&options())?, input);
        assert_eq!(output.matches("{{ path }}").count(), 1);
        Ok(())
    }

    #[test]
    fn test_script_defer_normalization() -> Result<()> {
        let rules = html_rules(&options())?;
        let defer = rule(&rules, "script-defer");
        assert_eq!(
            defer.apply(r#"<script type="module" src="a.js"></script>"#),
            r#"<script src="a.js" defer></script>"#
        );
        assert_eq!(
            defer.apply(r#"<script defer src="a.js" type="module"></script>"#),
            r#"<script src="a.js" defer></script>"#
        );
        assert_eq!(
            defer.apply(r#"<script src="a.js" defer></script>"#),
            r#"<script src="a.js" defer></script>"#
        );
        // Scripts without module/defer are untouched.
        let plain = r#"<script src="analytics.js" async></script>"#;
        assert_eq!(defer.apply(plain), plain);
        Ok(())
    }

    #[test]
    fn test_path_variable_with_dollar_is_literal() -> Result<()> {
        let mut opts = options();
        opts.path_variable = "$base/".to_string();
        let output = apply_rules(&html_rules(&opts)?, r#"<img src="a.png">"#);
        assert!(output.contains(r#"src="$base/a.png""#));
        Ok(())
    }

    #[test]
    fn test_absolute_reference_detection() {
        assert!(is_absolute_reference("https://a"));
        assert!(is_absolute_reference("mailto:x@y"));
        assert!(is_absolute_reference("/root.png"));
        assert!(is_absolute_reference("#frag"));
        assert!(is_absolute_reference(""));
        assert!(!is_absolute_reference("img/a.png"));
        assert!(!is_absolute_reference("{{ path }}a.png"));
        assert!(!is_absolute_reference("a.png?x=1:2"));
    }
}
