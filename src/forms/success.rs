use yew::prelude::*;

#[function_component(QuoteSuccess)]
pub fn quote_success() -> Html {
    html! {
        <div style="background: linear-gradient(135deg, #10B981 0%, #059669 100%); color: white; padding: 2rem; border-radius: 1rem; text-align: center; box-shadow: 0 10px 30px rgba(16, 185, 129, 0.3); animation: slideInUp 0.5s ease-out;">
            <i class="fas fa-check-circle" style="font-size: 3rem; margin-bottom: 1rem;"></i>
            <h3 style="font-size: 1.5rem; margin-bottom: 0.5rem; font-weight: 700;">
                {"Cotação Enviada com Sucesso!"}
            </h3>
            <p style="font-size: 1rem; opacity: 0.95; margin-bottom: 1rem;">
                {"Recebemos sua solicitação e entraremos em contato em breve."}
            </p>
            <p style="font-size: 0.875rem; opacity: 0.9;">
                {"Em até 24 horas você receberá nossa proposta personalizada."}
            </p>
        </div>
    }
}
