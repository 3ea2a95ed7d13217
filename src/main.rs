//! obj_scene - OBJ 网格查看器
//!
//! 加载 OBJ 网格，在无窗口渲染设备上按固定步长渲染两个旋转的立方体实例。
//!
//! # 使用方法
//!
//! ```bash
//! # 使用配置文件
//! cargo run
//!
//! # 严格数值解析，跳过出错的面，渲染 30 帧
//! cargo run -- --strict --skip-bad-faces --frames 30
//!
//! # 指定网格
//! cargo run -- --mesh assets/cube.obj
//! ```
//!
//! # 架构概览
//!
//! ```text
//! ┌─────────────┐
//! │   main.rs   │  应用程序入口
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  geometry   │  OBJ 解析 → MeshArrays
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Viewer    │  每帧为每个实例发出绘制
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │RenderDevice │  无窗口实现
//! └─────────────┘
//! ```

use std::path::Path;

use anyhow::Context;
use obj_scene::core::{log, Config, SceneConfig};
use obj_scene::geometry::loaders::{MeshLoader, ObjLoader};
use obj_scene::renderer::{FixedStepScheduler, HeadlessDevice, Viewer};
use obj_scene::{app_error, app_info};
use tracing::info;

/// 应用程序入口点
///
/// # 初始化流程
///
/// 1. 加载运行配置（config.toml）并应用命令行参数
/// 2. 初始化日志系统
/// 3. 加载场景配置（scene.toml）
/// 4. 加载网格
/// 5. 创建查看器并按固定步长渲染
fn main() -> anyhow::Result<()> {
    // 1. 加载配置（在初始化日志之前）
    let mut config = Config::from_file_or_default("config.toml");
    config.apply_args(std::env::args().skip(1));
    config.validate().context("Invalid configuration")?;

    // 2. 初始化日志系统
    let log_file = config
        .logging
        .file_output
        .then_some(config.logging.log_file.as_str());
    log::init_logger(config.logging.level, config.logging.file_output, log_file);
    app_info!(version = env!("CARGO_PKG_VERSION"), "obj_scene starting...");

    // 3. 场景配置
    let scene = SceneConfig::from_file_or_default("scene.toml");
    info!(
        eye = ?scene.camera.eye,
        fov = scene.camera.fov,
        instances = scene.instances.len(),
        texture = %scene.texture.path,
        "Scene configuration"
    );

    // 4. 加载网格
    let loader = ObjLoader::new(config.mesh.parse_options());
    let mesh = loader
        .load_from_file(Path::new(&config.mesh.path))
        .with_context(|| format!("Failed to load mesh '{}'", config.mesh.path))?;

    // 5. 渲染
    let device = HeadlessDevice::new(config.window.width, config.window.height);
    let mut viewer = Viewer::new(device, &mesh, scene).context("Failed to initialize viewer")?;
    let mut scheduler = FixedStepScheduler::new(config.run.frames, config.run.frame_rate);

    let frames = match viewer.run(&mut scheduler) {
        Ok(frames) => frames,
        Err(e) => {
            app_error!("Render loop failed: {}", e);
            return Err(e.into());
        }
    };

    let device = viewer.device();
    app_info!(
        frames,
        draws = device.draw_count(),
        triangles = device.triangles_drawn(),
        "Rendering finished"
    );

    Ok(())
}
