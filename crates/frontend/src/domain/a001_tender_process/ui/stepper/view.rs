use super::view_model::TenderProcessViewModel;
use crate::shared::date_utils::format_stamp;
use crate::shared::icons::icon;
use contracts::domain::a001_tender_process::{
    field, ProcessState, StepSchema, TenderId, TrackerPhase, TENDER_PROCESS_STEPS,
};
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

/// Текстовое поле шага с сообщением об ошибке под ним
#[component]
fn StepInput(
    vm: TenderProcessViewModel,
    name: &'static str,
    label: &'static str,
    #[prop(optional)] input_type: Option<&'static str>,
    #[prop(optional)] placeholder: Option<&'static str>,
) -> impl IntoView {
    let vm_value = vm.clone();
    let vm_input = vm.clone();

    view! {
        <div class="form-group">
            <label for=name>{label}</label>
            <input
                type=input_type.unwrap_or("text")
                id=name
                step=(input_type == Some("number")).then_some("any")
                prop:value=move || vm_value.form.with(|f| f.value(name))
                on:input=move |ev| vm_input.set_field(name, event_target_value(&ev))
                placeholder=placeholder.unwrap_or_default()
            />
            {move || vm.field_error(name).map(|e| view! { <div class="field-error">{e}</div> })}
        </div>
    }
}

#[component]
fn StepNotes(vm: TenderProcessViewModel) -> impl IntoView {
    let vm_value = vm.clone();
    let vm_input = vm.clone();

    view! {
        <div class="form-group">
            <label for=field::NOTES>{"Notes"}</label>
            <textarea
                id=field::NOTES
                prop:value=move || vm_value.form.with(|f| f.value(field::NOTES))
                on:input=move |ev| vm_input.set_field(field::NOTES, event_target_value(&ev))
                placeholder="What happened at this step"
                rows="3"
            />
            {move || vm.field_error(field::NOTES).map(|e| view! { <div class="field-error">{e}</div> })}
        </div>
    }
}

/// Заголовок степпера: все шаги с отметками прохождения
#[component]
fn StepList(state: RwSignal<ProcessState>) -> impl IntoView {
    view! {
        <ol class="stepper">
            {move || state.with(|s| {
                let current = s.current_index();
                let complete = s.is_complete();
                s.steps()
                    .iter()
                    .enumerate()
                    .map(|(i, step)| {
                        let completed = step.completed;
                        let class = if completed {
                            "stepper__step stepper__step--done"
                        } else if i == current && !complete {
                            "stepper__step stepper__step--current"
                        } else {
                            "stepper__step"
                        };
                        let stamp = format_stamp(&step.stamp.date, &step.stamp.time);
                        view! {
                            <li class=class>
                                <span class="stepper__marker">
                                    {if completed {
                                        icon("check")
                                    } else {
                                        view! { <span>{i + 1}</span> }.into_any()
                                    }}
                                </span>
                                <span class="stepper__label">{step.label}</span>
                                {(completed && !stamp.is_empty())
                                    .then(|| view! { <span class="stepper__stamp">{stamp}</span> })}
                            </li>
                        }
                    })
                    .collect_view()
            })}
        </ol>
    }
}

/// Форма текущего шага; набор полей зависит от схемы шага
#[component]
fn CurrentStepForm(vm: TenderProcessViewModel, index: usize, schema: StepSchema) -> impl IntoView {
    let total = TENDER_PROCESS_STEPS.len();
    let label = TENDER_PROCESS_STEPS
        .get(index)
        .map(|d| d.label)
        .unwrap_or_default();
    let is_last = index + 1 == total;

    let fields = match schema {
        StepSchema::General => view! {
            <StepNotes vm=vm.clone() />
            <StepInput vm=vm.clone() name=field::DATE label="Date" input_type="date" />
            <StepInput vm=vm.clone() name=field::TIME label="Time" input_type="time" />
        }
        .into_any(),
        StepSchema::WorkOrder => view! {
            <StepInput vm=vm.clone() name=field::WORK_ORDER_ID label="Work Order ID" placeholder="e.g. WO-2024-001" />
            <StepInput vm=vm.clone() name=field::WORK_ORDER_ISSUED_DATE label="Work Order Issued Date" input_type="date" />
        }
        .into_any(),
        StepSchema::Agreement => view! {
            <StepInput vm=vm.clone() name=field::AGREEMENT_ID label="Agreement ID" />
            <StepInput vm=vm.clone() name=field::AGREEMENT_VALUE label="Agreement Value" input_type="number" />
            <StepInput vm=vm.clone() name=field::AGREEMENT_ISSUED_DATE label="Agreement Issued Date" input_type="date" />
        }
        .into_any(),
    };

    let submitting = {
        let vm = vm.clone();
        Signal::derive(move || vm.is_submitting())
    };
    let artifact_name = vm.artifact_name;
    let vm_file = vm.clone();
    let vm_submit = vm.clone();

    view! {
        <div class="details-form">
            <h4>{format!("Step {} of {}: {}", index + 1, total, label)}</h4>

            {fields}

            {move || vm.field_error(field::FORM).map(|e| view! { <div class="field-error">{e}</div> })}

            <div class="form-group">
                <label for="step-file">{icon("upload")}" Attachment"</label>
                <input
                    type="file"
                    id="step-file"
                    on:change=move |ev| {
                        let file = ev
                            .target()
                            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                            .and_then(|input| input.files())
                            .and_then(|files| files.get(0));
                        vm_file.set_artifact(file);
                    }
                />
                {move || artifact_name.get().map(|n| view! { <div class="file-name">{n}</div> })}
            </div>

            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm_submit.submit()
                    disabled=submitting
                >
                    {icon("save")}
                    {if is_last { " Complete" } else { " Save & Next" }}
                </Button>
                {move || submitting.get().then(|| view! { <Spinner /> })}
            </div>
        </div>
    }
}

#[component]
pub fn TenderProcessStepper(tender_id: TenderId) -> impl IntoView {
    let vm = TenderProcessViewModel::new(tender_id);
    vm.load();

    let state = vm.state;
    // Фаза Submitting не пересоздаёт форму, иначе пропадёт выбранный файл
    let current = Memo::new(move |_| {
        state.with(|s| {
            (
                s.current_index(),
                s.current_step().schema,
                s.phase() == TrackerPhase::Loading,
                s.is_complete(),
            )
        })
    });

    let vm_error = vm.clone();
    let vm_reload = vm.clone();
    let vm_busy = vm.clone();
    let vm_form = vm.clone();

    view! {
        <div class="details-container tender-process">
            <div class="details-header">
                <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                    <h3>"Tender Process"</h3>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=Signal::derive(move || vm_busy.is_loading() || vm_busy.is_submitting())
                        on_click=move |_| vm_reload.load()
                    >
                        {icon("refresh")}
                        " Reload"
                    </Button>
                </Flex>
            </div>

            {move || vm_error.error.get().map(|e| view! {
                <div class="error">{icon("alert")}" "{e}</div>
            })}

            <StepList state=state />

            {move || {
                let (index, schema, loading, complete) = current.get();
                if loading {
                    view! {
                        <Flex gap=FlexGap::Small style="align-items: center; justify-content: center; padding: var(--spacing-xl);">
                            <Spinner />
                        </Flex>
                    }
                    .into_any()
                } else if complete {
                    view! {
                        <div class="success-message">
                            {icon("check")}
                            " All tender process steps are completed."
                        </div>
                    }
                    .into_any()
                } else {
                    view! { <CurrentStepForm vm=vm_form.clone() index=index schema=schema /> }.into_any()
                }
            }}
        </div>
    }
}
