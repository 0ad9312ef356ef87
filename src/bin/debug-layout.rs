/// Diagnostic tool to verify scan → tree → layout
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use jwalk::WalkDir;
use squarified_treemap::geometry::contains_rect;
use squarified_treemap::{LayoutTree, NamedWeight, NodeId, Rect, WeightedTree};

/// One entry collected during the scan, before tree construction.
struct ScannedEntry {
    path: PathBuf,
    parent: PathBuf,
    name: String,
    size: u64,
    is_dir: bool,
}

fn scan(root: &Path) -> Vec<ScannedEntry> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(root).skip_hidden(false).sort(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if entry.depth == 0 {
            continue;
        }

        let is_dir = entry.file_type.is_dir();
        let size = if is_dir {
            0
        } else {
            entry.metadata().map(|m| m.len()).unwrap_or(0)
        };
        entries.push(ScannedEntry {
            path: entry.path(),
            parent: entry.parent_path.to_path_buf(),
            name: entry.file_name.to_string_lossy().into_owned(),
            size,
            is_dir,
        });
    }
    entries
}

/// Build a weighted tree whose total weight equals `area`, so file sizes
/// map straight onto screen area.
fn build_tree(root: &Path, entries: &[ScannedEntry], area: f64) -> Result<WeightedTree<NamedWeight>> {
    let total_bytes: u64 = entries.iter().filter(|e| !e.is_dir).map(|e| e.size).sum();
    if total_bytes == 0 {
        bail!("nothing to lay out under {}", root.display());
    }
    let scale = area / total_bytes as f64;

    let root_name = root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| root.to_string_lossy().to_string());
    let mut tree = WeightedTree::new(Some(NamedWeight::group(&root_name)));

    // Map from path → NodeId for parent lookups
    let mut dirs: HashMap<PathBuf, NodeId> = HashMap::new();
    dirs.insert(root.to_path_buf(), tree.root());

    for entry in entries {
        let Some(&parent) = dirs.get(&entry.parent) else {
            tracing::debug!("Orphaned entry {}", entry.path.display());
            continue;
        };
        if entry.is_dir {
            let id = tree.add_child(parent, Some(NamedWeight::group(&entry.name)))?;
            dirs.insert(entry.path.clone(), id);
        } else {
            tree.add_child(parent, Some(NamedWeight::new(&entry.name, entry.size as f64 * scale)))?;
        }
    }

    tree.aggregate_weights();
    Ok(tree)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("squarified_treemap=debug".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let scan_path = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    let width: f64 = match args.next() {
        Some(w) => w.parse().context("viewport width")?,
        None => 1920.0,
    };
    let height: f64 = match args.next() {
        Some(h) => h.parse().context("viewport height")?,
        None => 1080.0,
    };

    println!("=== DIAGNOSTIC: Scan → Tree → Layout ===");
    println!("Scanning: {}", scan_path.display());

    let entries = scan(&scan_path);
    println!("\n[1] Scan completed: {} entries", entries.len());

    let tree = build_tree(&scan_path, &entries, width * height)?;
    println!("\n[2] Tree built: {} nodes", tree.len());

    let start = Instant::now();
    let layout = LayoutTree::build(Rect::new(0.0, 0.0, width, height), &tree)?;
    println!(
        "\n[3] Layout computed: {} nodes in {:.2?}",
        layout.node_count(),
        start.elapsed()
    );

    println!("\n[4] Top 10 largest files by area:");
    let mut leaves: Vec<_> = layout.rectangles(true).collect();
    leaves.sort_by(|a, b| b.0.area().total_cmp(&a.0.area()));
    for (i, (rect, payload)) in leaves.iter().take(10).enumerate() {
        let name = payload.map(|p| p.name.as_str()).unwrap_or("(unnamed)");
        println!(
            "    [{}] '{}' - rect: {:.1}x{:.1} ({:.0}px²) at ({:.1}, {:.1})",
            i,
            name,
            rect.width(),
            rect.height(),
            rect.area(),
            rect.x0,
            rect.y0
        );
    }

    println!("\n[5] Checking for anomalies:");
    let area_sum: f64 = leaves.iter().map(|(r, _)| r.area()).sum();
    let viewport_area = width * height;
    println!("    Total leaf area: {:.0}px²", area_sum);
    println!("    Viewport area:   {:.0}px²", viewport_area);
    println!("    Coverage: {:.1}%", (area_sum / viewport_area) * 100.0);

    let mut escaped = 0usize;
    for id in layout.walk_top_down(layout.root()) {
        let outer = layout.bounds(id)?;
        for &child in layout.children(id) {
            if !contains_rect(outer, layout.bounds(child)?) {
                escaped += 1;
            }
        }
    }
    println!("    Children escaping their parent: {}", escaped);

    let root = layout
        .node(layout.root())
        .context("layout has no root node")?;
    println!(
        "\n[6] Root split: {}",
        if root.is_leaf() {
            "none (leaf)"
        } else if root.split_vertical() {
            "vertical"
        } else {
            "horizontal"
        }
    );

    Ok(())
}
