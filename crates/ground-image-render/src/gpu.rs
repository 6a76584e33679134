//! wgpu upload of image textures.
//!
//! [`GpuImageTexture`] mirrors an [`ImageTexture`] on the GPU and re-uploads
//! only when the texture's generation moves.

use ground_image_core::material::{FilterOption, TextureAddressing, TextureUnit};

use crate::texture::{ImageAsset, ImageTexture};

/// Maps a material addressing mode to the wgpu sampler mode.
pub fn address_mode(addressing: TextureAddressing) -> wgpu::AddressMode {
    match addressing {
        TextureAddressing::Wrap => wgpu::AddressMode::Repeat,
        TextureAddressing::Clamp => wgpu::AddressMode::ClampToEdge,
    }
}

/// Maps a material filter stage to the wgpu filter mode.
///
/// A disabled stage samples nearest; textures here carry a single mip level.
pub fn filter_mode(filter: FilterOption) -> wgpu::FilterMode {
    match filter {
        FilterOption::None | FilterOption::Point => wgpu::FilterMode::Nearest,
        FilterOption::Linear => wgpu::FilterMode::Linear,
    }
}

/// GPU copy of an [`ImageTexture`].
pub struct GpuImageTexture {
    label: String,
    sampler: wgpu::Sampler,
    texture: Option<wgpu::Texture>,
    view: Option<wgpu::TextureView>,
    uploaded_generation: Option<u64>,
}

impl GpuImageTexture {
    /// Creates the sampler for `unit`. Nothing is uploaded until [`Self::sync`].
    pub fn new(device: &wgpu::Device, unit: &TextureUnit) -> Self {
        let address = address_mode(unit.addressing);
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(&unit.texture_name),
            address_mode_u: address,
            address_mode_v: address,
            address_mode_w: address,
            mag_filter: filter_mode(unit.filtering.mag),
            min_filter: filter_mode(unit.filtering.min),
            mipmap_filter: filter_mode(unit.filtering.mip),
            ..Default::default()
        });

        Self {
            label: unit.texture_name.clone(),
            sampler,
            texture: None,
            view: None,
            uploaded_generation: None,
        }
    }

    /// Brings the GPU copy up to date. Returns true if anything changed.
    pub fn sync(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, source: &ImageTexture) -> bool {
        if self.uploaded_generation == Some(source.generation()) {
            return false;
        }
        self.uploaded_generation = Some(source.generation());

        match source.image() {
            Some(image) => {
                let texture = upload_image(device, queue, &self.label, image);
                self.view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
                self.texture = Some(texture);
            }
            None => {
                self.view = None;
                self.texture = None;
            }
        }
        true
    }

    /// View for binding, `None` while the source texture is empty.
    pub fn view(&self) -> Option<&wgpu::TextureView> {
        self.view.as_ref()
    }

    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }
}

/// Uploads an RGBA8 image as an sRGB sampled texture.
pub fn upload_image(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    image: &ImageAsset,
) -> wgpu::Texture {
    let size = wgpu::Extent3d {
        width: image.width(),
        height: image.height(),
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        image.pixels(),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * image.width()),
            rows_per_image: Some(image.height()),
        },
        size,
    );

    texture
}
