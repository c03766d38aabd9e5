//! 打包任务
//!
//! `BundleTask` 依次执行四个阶段：读取入口文件、内联所有 HTML import 与外部脚本、
//! 拆分出内联脚本、写出 `<basename>.html` 和 `<basename>.js`。
//! 每次调用都是独立的，阶段之间只传递自身拥有的数据。

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::config::BundleConfig;
use crate::parsers::html::inliner::{inline_document, InlineOptions};
use crate::parsers::html::serializer::serialize_document;
use crate::parsers::html::splitter::{split_document, SplitOptions};
use crate::utils::url::{path_to_url, Url};

/// 打包错误
#[derive(Error, Debug)]
pub enum BundleError {
    /// 入口文件无法读取
    #[error("无法读取入口文件 {}", path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 被引用的 import、脚本或样式表无法读取
    #[error("无法解析 {} 中引用的 \"{reference}\"", referrer.display())]
    Resolution {
        reference: String,
        referrer: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 输出目录或输出文件无法写入
    #[error("无法写入 {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 序列化错误
    #[error("序列化文档失败")]
    Serialize(#[source] io::Error),

    /// 后台处理任务异常结束
    #[error("打包任务异常终止")]
    Join(#[from] tokio::task::JoinError),
}

/// 写出阶段写入的单个文件
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputFile {
    pub path: PathBuf,
    pub bytes: usize,
}

/// 一次成功打包写出的文件
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BundleOutput {
    pub html: OutputFile,
    pub js: OutputFile,
    /// 仅在提取样式时存在
    pub css: Option<OutputFile>,
    /// 移入脚本文件的内联脚本数量
    pub script_count: usize,
}

/// 内存中的打包结果，由处理阶段产生、写出阶段消费
struct RenderedBundle {
    html: Vec<u8>,
    js: Vec<u8>,
    css: Option<Vec<u8>>,
    script_count: usize,
}

/// 把一个入口 HTML 文件打包为 HTML/JS 文件对
#[derive(Clone, Debug)]
pub struct BundleTask {
    source: PathBuf,
    destination: PathBuf,
    inline_options: InlineOptions,
    split_options: SplitOptions,
}

impl BundleTask {
    /// 根据已解析的配置创建任务
    pub fn new(config: &BundleConfig) -> Self {
        Self {
            source: config.source_path(),
            destination: config.destination(),
            inline_options: config.vulcanize.clone(),
            split_options: config.crisper.clone(),
        }
    }

    /// 使用默认阶段选项创建任务
    pub fn from_paths(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            inline_options: InlineOptions::default(),
            split_options: SplitOptions::default(),
        }
    }

    pub fn with_inline_options(mut self, options: InlineOptions) -> Self {
        self.inline_options = options;
        self
    }

    pub fn with_split_options(mut self, options: SplitOptions) -> Self {
        self.split_options = options;
        self
    }

    pub fn source_path(&self) -> &Path {
        &self.source
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// 执行完整流程
    ///
    /// 入口文件或其任一引用无法读取时直接失败，不写出任何文件；
    /// 写出过程中失败时，已写出的文件保持不变。
    pub async fn build(&self) -> Result<BundleOutput, BundleError> {
        let basename = self.basename()?;

        info!("读取入口文件: {}", self.source.display());
        let data = tokio::fs::read(&self.source)
            .await
            .map_err(|source| self.source_error(source))?;
        let canonical = tokio::fs::canonicalize(&self.source)
            .await
            .map_err(|source| self.source_error(source))?;
        let entry_url = self.entry_url(&canonical)?;

        let inline_options = self.inline_options.clone();
        let split_options = self.split_options.clone();
        let name = basename.clone();
        let rendered = tokio::task::spawn_blocking(move || {
            render(&data, &entry_url, &name, &inline_options, &split_options)
        })
        .await??;

        info!("写出到目录: {}", self.destination.display());
        tokio::fs::create_dir_all(&self.destination)
            .await
            .map_err(|source| write_error(&self.destination, source))?;

        for (path, contents) in self.output_files(&basename, &rendered) {
            tokio::fs::write(&path, contents)
                .await
                .map_err(|source| write_error(&path, source))?;
            debug!("已写入 {} ({} 字节)", path.display(), contents.len());
        }

        Ok(self.output(&basename, &rendered))
    }

    /// 与 [`BundleTask::build`] 相同，但不需要异步运行时
    pub fn build_blocking(&self) -> Result<BundleOutput, BundleError> {
        let basename = self.basename()?;

        info!("读取入口文件: {}", self.source.display());
        let data = fs::read(&self.source).map_err(|source| self.source_error(source))?;
        let canonical = fs::canonicalize(&self.source).map_err(|source| self.source_error(source))?;
        let entry_url = self.entry_url(&canonical)?;

        let rendered = render(
            &data,
            &entry_url,
            &basename,
            &self.inline_options,
            &self.split_options,
        )?;

        info!("写出到目录: {}", self.destination.display());
        fs::create_dir_all(&self.destination)
            .map_err(|source| write_error(&self.destination, source))?;

        for (path, contents) in self.output_files(&basename, &rendered) {
            fs::write(&path, contents).map_err(|source| write_error(&path, source))?;
            debug!("已写入 {} ({} 字节)", path.display(), contents.len());
        }

        Ok(self.output(&basename, &rendered))
    }

    /// 输出文件名取自入口文件名去掉扩展名
    fn basename(&self) -> Result<String, BundleError> {
        self.source
            .file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                self.source_error(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "entry path has no file name",
                ))
            })
    }

    fn entry_url(&self, canonical: &Path) -> Result<Url, BundleError> {
        path_to_url(canonical).ok_or_else(|| {
            self.source_error(io::Error::new(
                io::ErrorKind::InvalidInput,
                "entry path cannot be expressed as a file URL",
            ))
        })
    }

    fn source_error(&self, source: io::Error) -> BundleError {
        BundleError::SourceNotFound {
            path: self.source.clone(),
            source,
        }
    }

    /// 写出顺序：脚本、样式，最后是 HTML
    fn output_files<'r>(
        &self,
        basename: &str,
        rendered: &'r RenderedBundle,
    ) -> Vec<(PathBuf, &'r [u8])> {
        let mut files: Vec<(PathBuf, &[u8])> =
            vec![(self.destination.join(format!("{basename}.js")), rendered.js.as_slice())];

        if let Some(css) = &rendered.css {
            files.push((self.destination.join(format!("{basename}.css")), css.as_slice()));
        }

        files.push((self.destination.join(format!("{basename}.html")), rendered.html.as_slice()));
        files
    }

    fn output(&self, basename: &str, rendered: &RenderedBundle) -> BundleOutput {
        let file = |ext: &str, contents: &[u8]| OutputFile {
            path: self.destination.join(format!("{basename}.{ext}")),
            bytes: contents.len(),
        };

        BundleOutput {
            html: file("html", &rendered.html),
            js: file("js", &rendered.js),
            css: rendered.css.as_deref().map(|css| file("css", css)),
            script_count: rendered.script_count,
        }
    }
}

/// 内联、拆分并序列化
///
/// DOM 使用 `Rc` 句柄，不能跨线程，因此这一步只返回字节。
fn render(
    data: &[u8],
    entry_url: &Url,
    basename: &str,
    inline_options: &InlineOptions,
    split_options: &SplitOptions,
) -> Result<RenderedBundle, BundleError> {
    let bundled = inline_document(data, entry_url, inline_options)?;
    info!("内联完成: {}", entry_url);

    let js_name = format!("{basename}.js");
    let css_name = format!("{basename}.css");
    let content = split_document(&bundled.dom, &js_name, &css_name, split_options);
    info!("拆分出 {} 个内联脚本", content.script_count);

    let html = serialize_document(&bundled.dom, &bundled.encoding)?;

    Ok(RenderedBundle {
        html,
        js: content.script.into_bytes(),
        css: content.style.map(String::into_bytes),
        script_count: content.script_count,
    })
}

fn write_error(path: &Path, source: io::Error) -> BundleError {
    BundleError::Write {
        path: path.to_path_buf(),
        source,
    }
}
