use crate::mode::Mode;

/// Opening of Great Expectations.
pub const DEFAULT_PROSE: &str = "My father's family name being Pirrip, and my Christian name Philip, my infant tongue could make of both names nothing longer or more explicit than Pip. So, I called myself Pip, and came to be called Pip.";

pub const DEFAULT_CODE: &str = "def classify_image(image_path):
    # Load the image
    image = cv2.imread(image_path)

    # Preprocess the image
    image = preprocess_image(image)

    # Classify the image
    result = model.predict(image)

    return result";

/// Built-in text for a mode, with a short label for the header.
/// Practice text is generated, so it has no sample.
pub fn default_text(mode: Mode) -> Option<(&'static str, &'static str)> {
    match mode {
        Mode::Prose => Some((DEFAULT_PROSE, "Great Expectations")),
        Mode::Code => Some((DEFAULT_CODE, "classify_image.py")),
        Mode::Practice => None,
    }
}
