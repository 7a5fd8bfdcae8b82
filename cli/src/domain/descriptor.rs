//! Deployment descriptor rendering.
//!
//! Produces the `conf/Catalina/localhost/ROOT.xml` text mapping the
//! application root to `doc_base` and mounting each classpath entry as a
//! virtual resource. Unlike the copied `conf/` templates, the descriptor
//! encodes the current invocation's configuration and is regenerated
//! unconditionally on every start.

use std::fmt::Write as _;
use std::path::Path;

use crate::domain::config::Config;
use crate::domain::environment::Ambient;
use crate::domain::error::EnvError;

/// Normalize one classpath entry to an absolute path string.
///
/// A leading `~/` is replaced with the user home directory, relative
/// entries are resolved against the invoking working directory, and
/// absolute entries pass through unchanged. A trailing `/` (marking a
/// directory entry) is preserved.
///
/// # Errors
///
/// Returns [`EnvError::UserHomeUnknown`] for a `~/` entry when the user
/// home directory cannot be determined.
pub fn normalize_entry(entry: &str, ambient: &Ambient) -> Result<String, EnvError> {
    if let Some(rest) = entry.strip_prefix("~/") {
        let home = ambient.user_home.as_deref().ok_or(EnvError::UserHomeUnknown)?;
        Ok(format!("{}/{rest}", home.display()))
    } else if Path::new(entry).is_absolute() {
        Ok(entry.to_string())
    } else {
        Ok(format!("{}/{entry}", ambient.cwd.display()))
    }
}

/// Render the deployment descriptor for the given configuration.
///
/// The context is always non-reloadable with directory linking and WAR
/// unpacking enabled, and carries a scanner directive forcing a full
/// classpath scan, since mounted resources are not physically present
/// under the webapp. An empty classpath renders no resource element.
///
/// # Errors
///
/// Returns an error when a classpath entry cannot be normalized.
pub fn render_descriptor(cfg: &Config, ambient: &Ambient) -> Result<String, EnvError> {
    let doc_base = if cfg.doc_base.is_absolute() {
        cfg.doc_base.clone()
    } else {
        ambient.cwd.join(&cfg.doc_base)
    };
    let entries = cfg
        .classpath
        .iter()
        .map(|entry| normalize_entry(entry, ambient))
        .collect::<Result<Vec<_>, _>>()?;

    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    let _ = writeln!(xml, "<Context docBase=\"{}\"", escape(&doc_base.display().to_string()));
    xml.push_str("         path=\"\"\n");
    xml.push_str("         reloadable=\"false\"\n");
    xml.push_str("         allowLinking=\"true\"\n");
    xml.push_str("         unpackWAR=\"true\">\n");
    xml.push_str(
        "  <JarScanner scanClassPath=\"true\" scanAllFiles=\"true\" scanAllDirectories=\"true\"/>\n",
    );
    if !entries.is_empty() {
        if cfg.compat.is_legacy() {
            render_virtual_classloader(&mut xml, &entries);
        } else {
            render_resource_sets(&mut xml, &entries);
        }
    }
    xml.push_str("</Context>\n");
    Ok(xml)
}

/// Tomcat 6/7 dialect: one combined virtual-resources and
/// virtual-classloader pair, entries joined by `,` and `;` respectively.
fn render_virtual_classloader(xml: &mut String, entries: &[String]) {
    let _ = writeln!(
        xml,
        "  <Resources className=\"org.apache.naming.resources.VirtualDirContext\"\n             \
         extraResourcePaths=\"{}\"/>",
        escape(&entries.join(","))
    );
    let _ = writeln!(
        xml,
        "  <Loader className=\"org.apache.catalina.loader.VirtualWebappLoader\"\n          \
         virtualClasspath=\"{}\"/>",
        escape(&entries.join(";"))
    );
}

/// Tomcat 8/9 dialect: one resource-set element per entry. Directory
/// entries (trailing `/`) mount as class directories; file entries mount
/// as library JARs keyed by filename.
fn render_resource_sets(xml: &mut String, entries: &[String]) {
    xml.push_str("  <Resources>\n");
    for entry in entries {
        if entry.ends_with('/') {
            let _ = writeln!(
                xml,
                "    <PreResources className=\"org.apache.catalina.webresources.DirResourceSet\"\n                  \
                 base=\"{}\"\n                  webAppMount=\"/WEB-INF/classes\"/>",
                escape(entry)
            );
        } else {
            let filename = entry.rsplit('/').next().unwrap_or(entry);
            let _ = writeln!(
                xml,
                "    <PreResources className=\"org.apache.catalina.webresources.FileResourceSet\"\n                  \
                 base=\"{}\"\n                  webAppMount=\"/WEB-INF/lib/{}\"/>",
                escape(entry),
                escape(filename)
            );
        }
    }
    xml.push_str("  </Resources>\n");
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::config::CompatLevel;

    fn ambient() -> Ambient {
        Ambient {
            catalina_home: Some(PathBuf::from("/opt/tomcat")),
            cwd: PathBuf::from("/project"),
            user_home: Some(PathBuf::from("/home/dev")),
        }
    }

    fn config(compat: CompatLevel, classpath: &[&str]) -> Config {
        Config {
            compat,
            classpath: classpath.iter().map(ToString::to_string).collect(),
            ..Config::default()
        }
    }

    #[test]
    fn tilde_entries_resolve_to_the_user_home() {
        let normalized = normalize_entry("~/libs/commons.jar", &ambient()).unwrap();
        assert_eq!(normalized, "/home/dev/libs/commons.jar");
        assert!(!normalized.contains('~'));
    }

    #[test]
    fn relative_entries_resolve_against_cwd() {
        assert_eq!(normalize_entry("lib/a.jar", &ambient()).unwrap(), "/project/lib/a.jar");
    }

    #[test]
    fn absolute_entries_pass_through() {
        assert_eq!(normalize_entry("/abs/classes/", &ambient()).unwrap(), "/abs/classes/");
    }

    #[test]
    fn tilde_without_user_home_is_an_error() {
        let ambient = Ambient {
            user_home: None,
            ..ambient()
        };
        assert!(normalize_entry("~/x.jar", &ambient).is_err());
    }

    #[test]
    fn doc_base_is_rendered_absolute() {
        let xml = render_descriptor(&config(CompatLevel::Tomcat9, &[]), &ambient()).unwrap();
        assert!(xml.contains("docBase=\"/project/build/webapp\""));
        assert!(xml.contains("reloadable=\"false\""));
        assert!(xml.contains("<JarScanner scanClassPath=\"true\""));
    }

    #[test]
    fn empty_classpath_renders_no_resource_element() {
        let xml = render_descriptor(&config(CompatLevel::Tomcat9, &[]), &ambient()).unwrap();
        assert!(!xml.contains("<Resources"));
        assert!(!xml.contains("<Loader"));
        assert!(xml.ends_with("</Context>\n"));
    }

    #[test]
    fn legacy_dialect_joins_entries_in_order() {
        let xml = render_descriptor(
            &config(CompatLevel::Tomcat7, &["lib/a.jar", "/abs/classes/"]),
            &ambient(),
        )
        .unwrap();
        assert!(xml.contains("extraResourcePaths=\"/project/lib/a.jar,/abs/classes/\""));
        assert!(xml.contains("virtualClasspath=\"/project/lib/a.jar;/abs/classes/\""));
        assert_eq!(xml.matches("VirtualWebappLoader").count(), 1);
        assert_eq!(xml.matches("VirtualDirContext").count(), 1);
    }

    #[test]
    fn modern_dialect_mounts_each_entry() {
        let xml = render_descriptor(
            &config(CompatLevel::Tomcat9, &["lib/a.jar", "~/commons.jar", "/abs/classes/"]),
            &ambient(),
        )
        .unwrap();
        assert_eq!(xml.matches("<PreResources").count(), 3);
        assert!(xml.contains("base=\"/project/lib/a.jar\""));
        assert!(xml.contains("webAppMount=\"/WEB-INF/lib/a.jar\""));
        assert!(xml.contains("base=\"/home/dev/commons.jar\""));
        assert!(xml.contains("webAppMount=\"/WEB-INF/lib/commons.jar\""));
        assert!(xml.contains("base=\"/abs/classes/\""));
        assert!(xml.contains("webAppMount=\"/WEB-INF/classes\""));
        assert!(!xml.contains("VirtualWebappLoader"));
    }

    #[test]
    fn tomcat_eight_uses_the_modern_dialect() {
        let xml =
            render_descriptor(&config(CompatLevel::Tomcat8, &["lib/a.jar"]), &ambient()).unwrap();
        assert!(xml.contains("FileResourceSet"));
    }

    #[test]
    fn attribute_values_are_escaped() {
        let cfg = Config {
            doc_base: PathBuf::from("/apps/a&b"),
            ..Config::default()
        };
        let xml = render_descriptor(&cfg, &ambient()).unwrap();
        assert!(xml.contains("docBase=\"/apps/a&amp;b\""));
    }
}
