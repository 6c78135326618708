//! Safe wrappers around FFmpeg FFI calls.
//!
//! All `unsafe` blocks needed for routine FFmpeg access live here.

use ffmpeg_next as ffmpeg;
use ffmpeg_next::util::channel_layout::ChannelLayout;

/// Read `sample_rate` from an `AVCodecParameters` struct.
///
/// `ffmpeg-next` does not expose this field through a safe accessor.
pub fn codec_params_sample_rate(params: &ffmpeg::codec::parameters::Parameters) -> u32 {
    // SAFETY: `params.as_ptr()` returns a valid non-null pointer for the
    // lifetime of `params`.  `sample_rate` is a plain i32 field.
    unsafe { (*params.as_ptr()).sample_rate as u32 }
}

/// Read `ch_layout.nb_channels` from an `AVCodecParameters` struct.
pub fn codec_params_channels(params: &ffmpeg::codec::parameters::Parameters) -> u16 {
    // SAFETY: same as `codec_params_sample_rate`.
    unsafe { (*params.as_ptr()).ch_layout.nb_channels as u16 }
}

/// Allocate a fresh `AVCodecParameters`, copy the encoder context into it,
/// and return it as a safe `ffmpeg::codec::Parameters`.
pub fn encoder_codec_parameters(
    encoder: &ffmpeg::codec::encoder::Audio,
) -> ffmpeg::codec::Parameters {
    use std::ops::Deref;
    use std::rc::Rc;
    let ctx: &ffmpeg::codec::Context = encoder.deref();
    // SAFETY: `avcodec_parameters_from_context` copies fields from a live,
    // opened encoder context into a freshly allocated parameters struct.
    unsafe {
        let params = ffmpeg::ffi::avcodec_parameters_alloc();
        ffmpeg::ffi::avcodec_parameters_from_context(params, ctx.as_ptr());
        ffmpeg::codec::Parameters::wrap(params, None::<Rc<dyn std::any::Any>>)
    }
}

/// Channel layout for a channel count we can produce (mono or stereo).
pub fn layout_for_channels(channels: u16) -> Option<ChannelLayout> {
    match channels {
        1 => Some(ChannelLayout::MONO),
        2 => Some(ChannelLayout::STEREO),
        _ => None,
    }
}

/// Channel layout of a decoded frame, falling back on the channel count
/// when the decoder left the layout unset.
pub fn frame_layout(frame: &ffmpeg::util::frame::Audio) -> ChannelLayout {
    if frame.channel_layout().bits() == 0 {
        match frame.channels() {
            1 => ChannelLayout::MONO,
            _ => ChannelLayout::STEREO,
        }
    } else {
        frame.channel_layout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_for_channels() {
        assert_eq!(layout_for_channels(1), Some(ChannelLayout::MONO));
        assert_eq!(layout_for_channels(2), Some(ChannelLayout::STEREO));
        assert_eq!(layout_for_channels(6), None);
    }
}
