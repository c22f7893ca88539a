//! HTTP-реализация хранилищ процесса тендера

use async_trait::async_trait;
use contracts::domain::a001_tender_process::{
    ParentRecordStore, ParentRecordUpdate, ProcessDataResponse, ProcessStore, SavedStepRecord,
    StepSubmission, StoreError, TenderId,
};
use gloo_net::http::{Request, Response};
use wasm_bindgen::JsCast;
use web_sys::{File, FormData, RequestInit, RequestMode};

use crate::shared::api_utils::{
    api_url, decode_error, encode_error, network_error, path_segment,
};

const STEP_PATH: &str = "/api/tender/process/step";
const STEP_WITH_FILE_PATH: &str = "/api/tender/processaws/step";

/// Бэкенд процесса тендера; файл шага передаётся как `web_sys::File`
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpProcessApi;

fn check_status(response: &Response) -> Result<(), StoreError> {
    if response.ok() {
        Ok(())
    } else {
        log::error!("{} returned HTTP {}", response.url(), response.status());
        Err(StoreError::Http {
            status: response.status(),
        })
    }
}

/// Сохранить шаг без файла (JSON)
async fn post_step_json(submission: &StepSubmission) -> Result<(), StoreError> {
    let response = Request::post(&api_url(STEP_PATH))
        .json(submission)
        .map_err(encode_error)?
        .send()
        .await
        .map_err(network_error)?;
    check_status(&response)
}

/// Сохранить шаг с файлом (multipart): поля шага и файл в поле `file`
async fn post_step_multipart(submission: &StepSubmission, file: &File) -> Result<(), StoreError> {
    let form_data = FormData::new().map_err(encode_error)?;
    for (name, value) in submission.form_fields() {
        form_data.append_with_str(name, &value).map_err(encode_error)?;
    }
    form_data
        .append_with_blob("file", file)
        .map_err(encode_error)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&form_data);

    let url = api_url(STEP_WITH_FILE_PATH);
    let request = web_sys::Request::new_with_str_and_init(&url, &opts).map_err(encode_error)?;

    let window = web_sys::window().ok_or_else(|| StoreError::Network("no window".to_string()))?;
    let resp_value = wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| StoreError::Network(format!("{e:?}")))?;
    let resp: web_sys::Response = resp_value
        .dyn_into()
        .map_err(|e| StoreError::Decode(format!("{e:?}")))?;

    if !resp.ok() {
        log::error!("{} returned HTTP {}", url, resp.status());
        return Err(StoreError::Http {
            status: resp.status(),
        });
    }
    Ok(())
}

#[async_trait(?Send)]
impl ProcessStore for HttpProcessApi {
    type Artifact = File;

    async fn fetch_steps(&self, tender_id: &TenderId) -> Result<Vec<SavedStepRecord>, StoreError> {
        let url = api_url(&format!(
            "/api/tender/process/{}",
            path_segment(tender_id.value())
        ));
        log::debug!("GET {}", url);

        let response = Request::get(&url).send().await.map_err(network_error)?;
        check_status(&response)?;

        let data: ProcessDataResponse = response.json().await.map_err(decode_error)?;
        Ok(data.process_data)
    }

    async fn save_step(
        &self,
        submission: &StepSubmission,
        artifact: Option<File>,
    ) -> Result<(), StoreError> {
        match artifact {
            Some(file) => {
                log::debug!(
                    "Saving step '{}' with file '{}'",
                    submission.step_key,
                    file.name()
                );
                post_step_multipart(submission, &file).await
            }
            None => {
                log::debug!("Saving step '{}'", submission.step_key);
                post_step_json(submission).await
            }
        }
    }
}

#[async_trait(?Send)]
impl ParentRecordStore for HttpProcessApi {
    async fn update_parent(
        &self,
        tender_id: &TenderId,
        update: &ParentRecordUpdate,
    ) -> Result<(), StoreError> {
        let url = api_url(&update.path(&path_segment(tender_id.value())));
        let body = update
            .to_json()
            .map_err(|e| StoreError::Encode(e.to_string()))?;
        log::debug!("PUT {}", url);

        let response = Request::put(&url)
            .json(&body)
            .map_err(encode_error)?
            .send()
            .await
            .map_err(network_error)?;
        check_status(&response)
    }
}
