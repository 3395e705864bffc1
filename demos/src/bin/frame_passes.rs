//! # Frame Passes Demo
//!
//! Builds a small post-processing frame purely out of resource read/write
//! declarations and prints the derived execution order. No pass declares
//! an explicit dependency; the ordering falls out of who touches the HDR
//! target, the depth buffer and the TAA history.

use passgraph::{GraphError, ResourceDependencyGraph};

/// A render pass in the demo frame.
struct FramePass {
    name: &'static str,
}

impl FramePass {
    fn new(name: &'static str) -> Self {
        Self { name }
    }
}

/// Identifies a GPU resource by handle; compared by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct GpuResource(u64);

fn main() -> Result<(), GraphError> {
    env_logger::init();

    let mut graph = ResourceDependencyGraph::new();

    let hdr_color = GpuResource(0);
    let depth = GpuResource(1);
    let history = GpuResource(2);

    // GBuffer writes HDR + depth.
    let gbuffer = graph.add_node(FramePass::new("gbuffer"));
    graph.add_write(gbuffer, hdr_color)?;
    graph.add_write(gbuffer, depth)?;

    // Lighting reads the GBuffer outputs and lights HDR in place.
    let lighting = graph.add_node(FramePass::new("lighting"));
    graph.add_read(lighting, hdr_color)?;
    graph.add_read(lighting, depth)?;
    graph.add_write(lighting, hdr_color)?;

    // TAA blends the current HDR with the history buffer.
    let taa = graph.add_node(FramePass::new("taa"));
    graph.add_read(taa, hdr_color)?;
    graph.add_read(taa, history)?;
    graph.add_write(taa, hdr_color)?;

    // Bloom threshold rewrites HDR destructively.
    let bloom = graph.add_node(FramePass::new("bloom_threshold"));
    graph.add_read(bloom, hdr_color)?;
    graph.add_write(bloom, hdr_color)?;

    let upscale = graph.add_node(FramePass::new("upscale"));
    graph.add_read(upscale, hdr_color)?;
    graph.add_write(upscale, hdr_color)?;

    let post_process = graph.add_node(FramePass::new("post_process"));
    graph.add_read(post_process, hdr_color)?;
    graph.add_write(post_process, hdr_color)?;

    // History resolve feeds the final HDR back into the TAA history.
    let history_resolve = graph.add_node(FramePass::new("history_resolve"));
    graph.add_read(history_resolve, hdr_color)?;
    graph.add_write(history_resolve, history)?;

    let order = graph.build_execution_order()?;
    log::info!("ordered {} passes", order.len());

    let names: Vec<&str> = order
        .iter()
        .filter_map(|&id| graph.get(id).map(|pass| pass.name))
        .collect();
    println!("{}", names.join(" -> "));

    Ok(())
}
