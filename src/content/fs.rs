//! Content read straight from a directory tree.
//!
//! ```text
//! content/
//!   articles/hello.md        -> partition `articles`,   path `/articles/hello`
//!   en/articles/hello.md     -> partition `articlesEN`, path `/en/articles/hello`
//!   goods/keyboard.yaml      -> partition `goods`
//! ```
//!
//! Markdown files carry their fields in a YAML front matter block, data files
//! (`.json`, `.yaml`, `.yml`) are a single object.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use super::{
    sort_by_date, ContentStore, Language, Partition, RawItem, StoreError,
};

const FRONT_MATTER_FENCE: &str = "---";

#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
    partitions: HashMap<String, PathBuf>,
}

impl FsStore {
    /// Builds the partition table for every `collection` × `locale` pair.
    pub fn new(
        root: impl Into<PathBuf>,
        collections: &[&str],
        locales: &[Language],
        default_locale: &Language,
    ) -> Self {
        let root = root.into();
        let mut partitions = HashMap::new();

        for collection in collections {
            for locale in locales {
                let partition =
                    Partition::for_language(collection, locale, default_locale);
                let dir = if locale == default_locale {
                    root.join(collection)
                } else {
                    root.join(locale.as_str()).join(collection)
                };
                partitions.insert(partition.key().to_owned(), dir);
            }
        }

        FsStore { root, partitions }
    }

    fn read_item(
        &self,
        dir: &Path,
        file: &Path,
    ) -> Result<Option<RawItem>, StoreError> {
        let ext = file.extension().and_then(|e| e.to_str()).unwrap_or("");
        let text = match ext {
            "md" | "json" | "yaml" | "yml" => std::fs::read_to_string(file)
                .map_err(|source| StoreError::Io {
                    path: file.display().to_string(),
                    source,
                })?,
            _ => return Ok(None),
        };

        let value = match ext {
            "md" => parse_front_matter(&text),
            "json" => serde_json::from_str::<Value>(&text)
                .map_err(|e| e.to_string()),
            _ => serde_yaml_ng::from_str::<Value>(&text)
                .map_err(|e| e.to_string()),
        }
        .map_err(|message| StoreError::FrontMatter {
            path: file.display().to_string(),
            message,
        })?;

        let mut item = RawItem::from(value);
        if let Some(slug) = slug_for(dir, file) {
            item.set_default("slug", slug);
        }
        if let Some(path) = route_for(&self.root, file) {
            item.set_default("path", path);
        }

        Ok(Some(item))
    }
}

impl ContentStore for FsStore {
    fn fetch_all(
        &self,
        partition: &str,
        sort_field: &str,
        descending: bool,
    ) -> Result<Vec<RawItem>, StoreError> {
        let dir = self
            .partitions
            .get(partition)
            .ok_or_else(|| StoreError::UnknownPartition(partition.to_owned()))?;

        if !dir.is_dir() {
            warn!("Partition \"{}\" has no directory at {:?}", partition, dir);
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        collect_files(dir, &mut files)?;

        let mut items = Vec::with_capacity(files.len());
        for file in &files {
            if let Some(item) = self.read_item(dir, file)? {
                items.push(item);
            }
        }
        debug!("Read {} items from partition \"{}\"", items.len(), partition);

        sort_by_date(&mut items, sort_field, descending);
        Ok(items)
    }
}

/// Depth-first, lexically ordered listing of every file under `dir`.
fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: dir.display().to_string(),
        source,
    };

    let mut entries = std::fs::read_dir(dir)
        .map_err(io_err)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err)?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            collect_files(&path, out)?;
        } else {
            out.push(path);
        }
    }
    Ok(())
}

/// Extracts the YAML block between the leading `---` fences.
fn parse_front_matter(text: &str) -> Result<Value, String> {
    let text = text.trim_start_matches('\u{feff}');
    let mut lines = text.lines();

    if lines.next().map(str::trim_end) != Some(FRONT_MATTER_FENCE) {
        return Ok(Value::Object(Default::default()));
    }

    let mut yaml = String::new();
    for line in lines {
        if line.trim_end() == FRONT_MATTER_FENCE {
            return serde_yaml_ng::from_str::<Value>(&yaml)
                .map_err(|e| e.to_string());
        }
        yaml.push_str(line);
        yaml.push('\n');
    }

    Err("front matter is never closed".to_owned())
}

/// Slug of `file` within its partition `dir`: `2024/hello` for
/// `<dir>/2024/hello.md`, `series` for `<dir>/series/index.md`.
fn slug_for(dir: &Path, file: &Path) -> Option<String> {
    match route_for(dir, file)?.as_str() {
        "/" => dir.file_name()?.to_str().map(str::to_owned),
        route => Some(route.trim_start_matches('/').to_owned()),
    }
}

/// `content/en/articles/hello.md` -> `/en/articles/hello`
fn route_for(root: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(root).ok()?.with_extension("");
    let mut route = String::new();
    for part in relative.components() {
        route.push('/');
        route.push_str(part.as_os_str().to_str()?);
    }

    match route.strip_suffix("/index") {
        Some("") => Some("/".to_owned()),
        Some(parent) => Some(parent.to_owned()),
        None => Some(route),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn lang(code: &str) -> Language {
        code.parse().unwrap()
    }

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn article(title: &str, published_at: &str) -> String {
        format!(
            "---\ntitle: {}\ndescription: about {}\npublishedAt: \"{}\"\n---\n\n# {}\n",
            title, title, published_at, title
        )
    }

    fn store(root: &Path) -> FsStore {
        FsStore::new(root, &["articles"], &[lang("zh"), lang("en")], &lang("zh"))
    }

    #[test]
    fn front_matter_is_parsed() {
        let value =
            parse_front_matter("---\ntitle: Hello\ntags: [a, b]\n---\nbody").unwrap();

        assert_eq!(value["title"], "Hello");
        assert_eq!(value["tags"][1], "b");
    }

    #[test]
    fn unclosed_front_matter_is_an_error() {
        assert!(parse_front_matter("---\ntitle: Hello\n").is_err());
    }

    #[test]
    fn missing_front_matter_is_an_empty_item() {
        assert_eq!(
            parse_front_matter("# Just a heading").unwrap(),
            Value::Object(Default::default())
        );
    }

    #[test]
    fn routes_follow_file_layout() {
        let root = Path::new("/srv/content");

        assert_eq!(
            route_for(root, &root.join("en/articles/hello.md")).as_deref(),
            Some("/en/articles/hello")
        );
        assert_eq!(
            route_for(root, &root.join("articles/series/index.md")).as_deref(),
            Some("/articles/series")
        );
        let articles = root.join("articles");
        assert_eq!(
            slug_for(&articles, &articles.join("series/index.md")).as_deref(),
            Some("series")
        );
        assert_eq!(
            slug_for(&articles, &articles.join("index.md")).as_deref(),
            Some("articles")
        );
    }

    #[test]
    fn partitions_are_read_separately() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "articles/a.md", &article("A", "2024-01-01"));
        write(dir.path(), "articles/b.md", &article("B", "2024-06-01"));
        write(dir.path(), "en/articles/c.md", &article("C", "2024-03-01"));
        write(dir.path(), "articles/notes.txt", "ignored");

        let store = store(dir.path());

        let zh = store.fetch_all("articles", "publishedAt", true).unwrap();
        let zh: Vec<_> = zh.iter().filter_map(|i| i.get_str("slug")).collect();
        assert_eq!(zh, ["b", "a"]);

        let en = store.fetch_all("articlesEN", "publishedAt", true).unwrap();
        assert_eq!(en.len(), 1);
        assert_eq!(en[0].get_str("path"), Some("/en/articles/c"));
    }

    #[test]
    fn unknown_partition_fails_even_if_directory_exists() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "fr/articles/a.md", &article("A", "2024-01-01"));

        assert!(matches!(
            store(dir.path()).fetch_all("articlesFR", "publishedAt", true),
            Err(StoreError::UnknownPartition(_))
        ));
    }

    #[test]
    fn known_partition_without_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();

        assert!(store(dir.path())
            .fetch_all("articlesEN", "publishedAt", true)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn explicit_slug_wins_over_file_name() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "articles/2024-01-01-post.md",
            "---\ntitle: Post\nslug: post\npublishedAt: 2024-01-01\n---\n",
        );

        let items = store(dir.path()).fetch_all("articles", "publishedAt", true).unwrap();
        assert_eq!(items[0].get_str("slug"), Some("post"));
    }

    #[test]
    fn data_files_are_read() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "articles/data.json",
            r#"{ "title": "Json", "publishedAt": "2024-02-01" }"#,
        );
        write(dir.path(), "articles/data2.yml", "title: Yaml\npublishedAt: 2024-03-01\n");

        let items = store(dir.path()).fetch_all("articles", "publishedAt", true).unwrap();
        let titles: Vec<_> = items.iter().filter_map(|i| i.get_str("title")).collect();
        assert_eq!(titles, ["Yaml", "Json"]);
    }

    #[test]
    fn nested_files_get_distinct_slugs() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "articles/2024/hello.md", &article("Old hello", "2024-01-01"));
        write(dir.path(), "articles/2025/hello.md", &article("New hello", "2025-01-01"));

        let items = store(dir.path()).fetch_all("articles", "publishedAt", true).unwrap();
        let slugs: Vec<_> = items.iter().filter_map(|i| i.get_str("slug")).collect();
        assert_eq!(slugs, ["2025/hello", "2024/hello"]);
        assert_eq!(items[0].get_str("path"), Some("/articles/2025/hello"));
    }
}
