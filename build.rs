use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=frontend/dist");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let dist_path = Path::new(&manifest_dir).join("frontend/dist");

    // rust-embed 需要目录存在，未构建前端时写入占位页面
    if !dist_path.join("index.html").exists() {
        println!("cargo:warning=frontend/dist not found, embedding placeholder page");
        create_placeholder(&dist_path);
    }
}

fn create_placeholder(dist_path: &Path) {
    fs::create_dir_all(dist_path).expect("Failed to create dist directory");

    let placeholder = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>SchoolAdmin Pro</title>
    <style>
        body { font-family: system-ui, sans-serif; max-width: 640px; margin: 80px auto; padding: 20px; }
        .note { background: #eef4ff; border: 1px solid #c7d7fe; padding: 16px; border-radius: 8px; }
        code { background: #f1f3f4; padding: 2px 6px; border-radius: 4px; }
    </style>
</head>
<body>
    <h1>SchoolAdmin Pro</h1>
    <div class="note">
        <p>The dashboard has not been built. The JSON API is available under <code>/api/v1</code>.</p>
        <p><code>cd frontend && npm install && npm run build</code></p>
    </div>
</body>
</html>"#;

    fs::write(dist_path.join("index.html"), placeholder)
        .expect("Failed to write placeholder index.html");
}
