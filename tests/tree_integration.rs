//! Integration tests for walking and refreshing a real directory.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use treeview::tree::preorder;
use treeview::{process_tree, TreeChange, TreeNode, TreeOptions, TreeView};

/// root/a ("aaa") and root/sub/b.txt ("bbb").
fn fixture() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("root");
    fs::create_dir_all(root.join("sub")).unwrap();
    fs::write(root.join("a"), "aaa").unwrap();
    fs::write(root.join("sub").join("b.txt"), "bbb").unwrap();
    (tmp, root)
}

fn content_options() -> TreeOptions {
    TreeOptions {
        content: true,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_cold_walk() {
    let (_tmp, root) = fixture();
    let tree = process_tree(&root, content_options()).await.unwrap();

    assert_eq!(tree.len(), 2);

    let a = tree[0].as_file().expect("a is a file");
    assert_eq!(a.header.name, "a");
    assert_eq!(a.size, 3);
    assert_eq!(a.content.as_deref(), Some("aaa"));
    assert_eq!(a.ext, "");
    assert!(a.modified.is_some());

    let sub = tree[1].as_dir().expect("sub is a directory");
    assert_eq!(sub.header.name, "sub");
    assert_eq!(sub.nodes.len(), 1);
    let b = sub.nodes[0].as_file().expect("b.txt is a file");
    assert_eq!(b.header.name, "b.txt");
    assert_eq!(b.size, 3);
    assert_eq!(b.content.as_deref(), Some("bbb"));
    assert_eq!(b.ext, "txt");
    assert_eq!(b.header.depth, 1);
}

#[tokio::test]
async fn test_walk_matches_walkdir() {
    let (_tmp, root) = fixture();
    fs::create_dir_all(root.join("x/y/z")).unwrap();
    fs::write(root.join("x/y/z/deep.rs"), "fn main() {}").unwrap();

    let tree = process_tree(&root, TreeOptions::default()).await.unwrap();
    let walked: BTreeSet<PathBuf> = preorder(&tree)
        .into_iter()
        .map(|n| n.pathname().to_path_buf())
        .collect();

    let expected: BTreeSet<PathBuf> = walkdir::WalkDir::new(&root)
        .min_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .map(|e| e.path().to_path_buf())
        .collect();

    assert_eq!(walked, expected);

    for node in preorder(&tree) {
        let below = node.pathname().strip_prefix(&root).unwrap();
        assert_eq!(node.depth(), below.components().count() - 1);
    }
}

#[tokio::test]
async fn test_excluded_subtree_is_absent() {
    let (_tmp, root) = fixture();
    let options = TreeOptions {
        exclude: vec![root.join("sub")],
        ..Default::default()
    };
    let tree = process_tree(&root, options).await.unwrap();

    let names: Vec<&str> = tree.iter().map(TreeNode::name).collect();
    assert_eq!(names, vec!["a"]);
}

#[tokio::test]
async fn test_depth_limit() {
    let (_tmp, root) = fixture();
    fs::create_dir_all(root.join("sub/inner")).unwrap();
    fs::write(root.join("sub/inner/c"), "c").unwrap();

    let shallow = TreeOptions {
        depth: Some(0),
        ..Default::default()
    };
    let tree = process_tree(&root, shallow).await.unwrap();
    assert!(tree[1].children().is_empty());

    let one = TreeOptions {
        depth: Some(1),
        ..Default::default()
    };
    let tree = process_tree(&root, one).await.unwrap();
    let sub = tree[1].children();
    assert_eq!(sub.len(), 2);
    let inner = sub.iter().find(|n| n.name() == "inner").unwrap();
    assert!(inner.is_dir());
    assert!(inner.children().is_empty());
}

#[tokio::test]
async fn test_hidden_files() {
    let (_tmp, root) = fixture();
    fs::write(root.join(".env"), "SECRET=1").unwrap();

    let tree = process_tree(&root, TreeOptions::default()).await.unwrap();
    assert!(tree.iter().all(|n| n.name() != ".env"));

    let all = TreeOptions {
        all: true,
        ..Default::default()
    };
    let tree = process_tree(&root, all).await.unwrap();
    assert_eq!(tree[0].name(), ".env");
}

#[tokio::test]
async fn test_binary_content_is_base64() {
    let (_tmp, root) = fixture();
    fs::write(root.join("pixel.png"), [0x89u8, b'P', b'N', b'G']).unwrap();

    let tree = process_tree(&root, content_options()).await.unwrap();
    let png = tree
        .iter()
        .find_map(|n| n.as_file().filter(|f| f.header.name == "pixel.png"))
        .unwrap();
    assert!(png.binary);
    assert_eq!(png.ext, "png");
    assert_eq!(png.content.as_deref(), Some("iVBORw=="));
}

#[tokio::test]
async fn test_relative_paths() {
    let (_tmp, root) = fixture();
    let options = TreeOptions {
        relative: true,
        ..Default::default()
    };
    let tree = process_tree(&root, options).await.unwrap();
    assert_eq!(tree[0].path(), Path::new(""));
    assert_eq!(tree[1].children()[0].pathname(), Path::new("sub/b.txt"));
}

#[tokio::test]
async fn test_glob_filter() {
    let (_tmp, root) = fixture();
    let options = TreeOptions {
        glob: vec!["**/*.txt".to_string()],
        ..Default::default()
    };
    let tree = process_tree(&root, options).await.unwrap();
    let files: Vec<&str> = preorder(&tree)
        .into_iter()
        .filter(|n| n.is_file())
        .map(TreeNode::name)
        .collect();
    assert_eq!(files, vec!["b.txt"]);
}

#[tokio::test]
async fn test_missing_root_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let err = process_tree(tmp.path().join("nope"), TreeOptions::default())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("failed to read directory"));
}

#[tokio::test]
async fn test_rename_is_add_plus_unlink() {
    let (_tmp, root) = fixture();
    let view = TreeView::new(content_options()).unwrap();
    let mut result = view.process(&root).await.unwrap();

    fs::rename(root.join("a"), root.join("z")).unwrap();

    let changes = view.refresh(&mut result, &[root.join("z")]).await;
    assert!(matches!(&changes[..], [TreeChange::Add(node)] if node.name() == "z"));
    assert!(result.tree.iter().any(|n| n.name() == "a"));

    let changes = view.refresh(&mut result, &[root.join("a")]).await;
    assert!(matches!(&changes[..], [TreeChange::Unlink(node)] if node.name() == "a"));

    let names: Vec<&str> = result.tree.iter().map(TreeNode::name).collect();
    assert_eq!(names, vec!["sub", "z"]);
    let z = result.tree[1].as_file().unwrap();
    assert_eq!(z.content.as_deref(), Some("aaa"));
}

#[tokio::test]
async fn test_refresh_new_directory() {
    let (_tmp, root) = fixture();
    let view = TreeView::new(TreeOptions::default()).unwrap();
    let mut result = view.process(&root).await.unwrap();

    fs::create_dir_all(root.join("sub/new/deeper")).unwrap();
    fs::write(root.join("sub/new/deeper/f"), "f").unwrap();

    let changes = view
        .refresh(&mut result, &[root.join("sub/new/deeper/f"), root.join("sub/new")])
        .await;
    assert_eq!(changes.len(), 1);

    let new = result.tree[1]
        .children()
        .iter()
        .find(|n| n.name() == "new")
        .unwrap();
    assert_eq!(new.depth(), 1);
    let f = &new.children()[0].children()[0];
    assert_eq!(f.pathname(), root.join("sub/new/deeper/f"));
    assert_eq!(f.depth(), 3);
}
