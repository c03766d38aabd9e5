// 集成测试公共模块
//
// 在临时目录中搭建待打包的组件项目

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// 入口页面：在 `<head>` 中导入组件并引用一个外部脚本
pub const ADMIN_VIEW: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <link rel="import" href="elements/admin-panel.html">
  <script src="vendor/polyfill.js"></script>
</head>
<body>
  <admin-panel></admin-panel>
  <script>document.querySelector('admin-panel').ready = true;</script>
</body>
</html>
"#;

pub const ADMIN_PANEL: &str = r#"<link rel="import" href="admin-badge.html">
<dom-module id="admin-panel">
  <template><style>:host { background: url(img/panel.png); }</style><admin-badge></admin-badge></template>
  <script>Polymer({ is: 'admin-panel' });</script>
</dom-module>
"#;

pub const ADMIN_BADGE: &str = r#"<dom-module id="admin-badge"><template><span>[[count]]</span></template><script>Polymer({ is: 'admin-badge' });</script></dom-module>
"#;

pub const POLYFILL: &str = "window.polyfilled = true;";

/// 按文档顺序拆分出的脚本
pub const ADMIN_VIEW_JS: &str = "window.polyfilled = true;\n;\nPolymer({ is: 'admin-badge' });\n;\nPolymer({ is: 'admin-panel' });\n;\ndocument.querySelector('admin-panel').ready = true;\n";

/// 临时项目目录
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    /// 包含 `src/admin-view.html` 及其全部依赖的项目
    pub fn admin_view() -> Self {
        let project = Self::new();
        project.write("src/admin-view.html", ADMIN_VIEW);
        project.write("src/elements/admin-panel.html", ADMIN_PANEL);
        project.write("src/elements/admin-badge.html", ADMIN_BADGE);
        project.write("src/vendor/polyfill.js", POLYFILL);
        project
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture dir");
        }
        fs::write(&path, contents).expect("write fixture");
        path
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).expect("read output")
    }
}
