use poem_openapi::Object;

#[derive(Object, Debug)]
pub struct BroadcastRequestDto {
    #[oai(validator(min_length = 1))]
    pub template_name: String,
    #[oai(validator(min_length = 1))]
    pub language_code: String,
    #[oai(default)]
    pub dry_run: bool,
}
