//! Browser image probe: loads each URL through an `HtmlImageElement` and
//! reads its natural size once `onload` fires.

use collage_core::error::{LoadError, LoadFailure};
use collage_core::probe::{ImageProbe, NaturalSize};
use js_sys::{Array, Promise};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlImageProbe;

impl ImageProbe for HtmlImageProbe {
    async fn probe(&self, url: &str) -> Result<NaturalSize, LoadError> {
        load_natural_size(url).await
    }
}

async fn load_natural_size(url: &str) -> Result<NaturalSize, LoadError> {
    let img = HtmlImageElement::new()
        .map_err(|_| LoadError::new(url, LoadFailure::Host("no image element".into())))?;
    let img = std::rc::Rc::new(img);

    let promise = Promise::new(&mut |resolve, reject| {
        let loaded = img.clone();
        let onload = Closure::once(move || {
            let dims = Array::new();
            dims.push(&JsValue::from_f64(loaded.natural_width() as f64));
            dims.push(&JsValue::from_f64(loaded.natural_height() as f64));
            let _ = resolve.call1(&JsValue::NULL, &dims);
        });
        let onerror = Closure::once(move || {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("image_load_failed"));
        });
        img.set_onload(Some(onload.as_ref().unchecked_ref()));
        img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        img.set_src(url);
        onload.forget();
        onerror.forget();
    });

    let value = JsFuture::from(promise)
        .await
        .map_err(|_| LoadError::new(url, LoadFailure::Decode))?;
    let dims = Array::from(&value);
    let width = dims.get(0).as_f64().unwrap_or(0.0) as u32;
    let height = dims.get(1).as_f64().unwrap_or(0.0) as u32;
    Ok(NaturalSize::new(width, height))
}
