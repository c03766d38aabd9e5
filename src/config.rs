//! 打包配置
//!
//! 配置来源按优先级从低到高：配置文件（TOML 或 JSON）、环境变量、命令行参数。
//! 命令行参数由二进制程序在加载完成后直接写入 [`BundleConfig`]。

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::BundleError;
use crate::parsers::html::inliner::InlineOptions;
use crate::parsers::html::splitter::SplitOptions;

/// 默认配置文件搜索路径
pub const CONFIG_PATHS: &[&str] = &[
    "wc-bundle.toml",
    "wc-bundle.json",
    "~/.config/wc-bundle/config.toml",
];

/// 入口文档的位置以及打包结果的去向
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementPaths {
    /// 入口 HTML 文档
    pub src: PathBuf,
    /// 输出子目录，相对于 `build.rootDirectory`
    pub dest: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildPaths {
    pub root_directory: PathBuf,
}

impl Default for BuildPaths {
    fn default() -> Self {
        Self {
            root_directory: PathBuf::from("."),
        }
    }
}

/// 一次打包的完整配置
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BundleConfig {
    pub admin_view_elem: ElementPaths,
    pub build: BuildPaths,
    /// 内联阶段选项
    pub vulcanize: InlineOptions,
    /// 拆分阶段选项
    pub crisper: SplitOptions,
}

impl BundleConfig {
    /// 加载 [`CONFIG_PATHS`] 中找到的第一个配置文件
    ///
    /// 都不存在时使用默认配置，两种情况下都会应用环境变量覆盖。
    pub fn discover() -> Result<Self, BundleError> {
        let mut config = match find_config_file() {
            Some(path) => {
                info!("加载配置文件: {}", path.display());
                Self::load_from_file(&path)?
            }
            None => {
                info!("未找到配置文件，使用默认配置");
                Self::default()
            }
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// 加载 `path` 并应用环境变量覆盖
    pub fn load(path: &Path) -> Result<Self, BundleError> {
        let mut config = Self::load_from_file(path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// 按扩展名以 TOML 或 JSON 解析配置文件
    pub fn load_from_file(path: &Path) -> Result<Self, BundleError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BundleError::Config(format!("读取配置文件 {} 失败: {}", path.display(), e))
        })?;

        let mut config: Self = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| BundleError::Config(format!("解析JSON配置失败: {}", e)))?,
            _ => toml::from_str(&content)
                .map_err(|e| BundleError::Config(format!("解析TOML配置失败: {}", e)))?,
        };

        config.expand_paths();
        Ok(config)
    }

    /// 应用环境变量覆盖
    pub fn apply_env_overrides(&mut self) -> Result<(), BundleError> {
        use crate::env::{bundle, EnvVar};

        let env_error = |e: crate::env::EnvError| BundleError::Config(e.to_string());

        if let Some(src) = bundle::Src::get_opt().map_err(env_error)? {
            info!("环境变量覆盖入口文件: {}", src.display());
            self.admin_view_elem.src = src;
        }

        if let Some(root) = bundle::RootDir::get_opt().map_err(env_error)? {
            info!("环境变量覆盖输出根目录: {}", root.display());
            self.build.root_directory = root;
        }

        if let Some(dest) = bundle::Dest::get_opt().map_err(env_error)? {
            info!("环境变量覆盖输出子目录: {}", dest.display());
            self.admin_view_elem.dest = dest;
        }

        Ok(())
    }

    /// 验证配置
    pub fn validate(&self) -> Result<(), BundleError> {
        if self.admin_view_elem.src.as_os_str().is_empty() {
            return Err(BundleError::Config("adminViewElem.src 未设置".to_string()));
        }

        if self.admin_view_elem.dest.as_os_str().is_empty() {
            return Err(BundleError::Config("adminViewElem.dest 未设置".to_string()));
        }

        if self.build.root_directory.as_os_str().is_empty() {
            return Err(BundleError::Config("build.rootDirectory 不能为空".to_string()));
        }

        Ok(())
    }

    pub fn source_path(&self) -> PathBuf {
        self.admin_view_elem.src.clone()
    }

    /// `build.rootDirectory` 与 `adminViewElem.dest` 拼接后的目录
    pub fn destination(&self) -> PathBuf {
        self.build.root_directory.join(&self.admin_view_elem.dest)
    }

    /// 将配置渲染为 TOML
    pub fn to_toml(&self) -> Result<String, BundleError> {
        toml::to_string_pretty(self)
            .map_err(|e| BundleError::Config(format!("序列化配置失败: {}", e)))
    }

    /// 示例配置
    pub fn example() -> Self {
        Self {
            admin_view_elem: ElementPaths {
                src: PathBuf::from("src/admin-view.html"),
                dest: PathBuf::from("admin-view"),
            },
            build: BuildPaths {
                root_directory: PathBuf::from("build"),
            },
            ..Self::default()
        }
    }

    fn expand_paths(&mut self) {
        expand(&mut self.admin_view_elem.src);
        expand(&mut self.admin_view_elem.dest);
        expand(&mut self.build.root_directory);
        for exclude in self.vulcanize.excludes.iter_mut() {
            expand(exclude);
        }
    }
}

fn expand(path: &mut PathBuf) {
    if let Some(raw) = path.to_str() {
        *path = PathBuf::from(shellexpand::tilde(raw).as_ref());
    }
}

fn find_config_file() -> Option<PathBuf> {
    CONFIG_PATHS
        .iter()
        .map(|path| PathBuf::from(shellexpand::tilde(path).as_ref()))
        .find(|path| path.is_file())
}
